//! # Concurrency Scenarios
//!
//! One board shared across OS threads: parallel fires, subscription churn
//! during dispatch, and registration races.

#[cfg(test)]
mod tests {
    use crate::support::*;
    use board::{Board, ErrorKind};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    const THREADS: usize = 8;
    const FIRES_PER_THREAD: usize = 200;

    fn tick_board() -> Arc<Board> {
        init_tracing();
        let board = Arc::new(Board::new());
        board.register::<dyn TickListener, Tick>().unwrap();
        board
    }

    #[test]
    fn test_parallel_fires_reach_every_listener() {
        let board = tick_board();
        let counters: Vec<_> = (0..4).map(|_| Arc::new(TickCounter::default())).collect();
        for counter in &counters {
            board.add_listener(counter).unwrap();
        }

        thread::scope(|scope| {
            for worker in 0..THREADS {
                let board = Arc::clone(&board);
                scope.spawn(move || {
                    for i in 0..FIRES_PER_THREAD {
                        let seq = (worker * FIRES_PER_THREAD + i) as u64;
                        assert_eq!(board.fire(&Tick { seq }).unwrap(), 4);
                    }
                });
            }
        });

        for counter in &counters {
            assert_eq!(counter.ticks(), THREADS * FIRES_PER_THREAD);
            assert_eq!(counter.max_seq(), THREADS * FIRES_PER_THREAD - 1);
        }
        let metrics = board.metrics().snapshot();
        assert_eq!(metrics.events_fired, (THREADS * FIRES_PER_THREAD) as u64);
        assert_eq!(metrics.deliveries, (THREADS * FIRES_PER_THREAD * 4) as u64);
    }

    #[test]
    fn test_subscription_churn_during_fires() {
        let board = tick_board();
        let anchor = Arc::new(TickCounter::default());
        board.add_listener(&anchor).unwrap();

        let churners: Vec<_> = (0..THREADS).map(|_| Arc::new(TickCounter::default())).collect();

        thread::scope(|scope| {
            for churner in &churners {
                let board = Arc::clone(&board);
                scope.spawn(move || {
                    for _ in 0..FIRES_PER_THREAD {
                        board.add_listener(churner).unwrap();
                        assert!(board.remove_listener(churner).unwrap());
                    }
                });
            }
            let board = Arc::clone(&board);
            scope.spawn(move || {
                for seq in 0..FIRES_PER_THREAD as u64 {
                    let delivered = board.fire(&Tick { seq }).unwrap();
                    assert!((1..=THREADS + 1).contains(&delivered));
                }
            });
        });

        assert_eq!(anchor.ticks(), FIRES_PER_THREAD);
        assert_eq!(board.listener_count::<dyn TickListener>(), 1);
        assert!(churners.iter().all(|churner| !board.is_subscribed(churner)));
    }

    #[test]
    fn test_registration_race_has_one_winner() {
        init_tracing();
        let board = Arc::new(Board::new());
        let winners = AtomicUsize::new(0);
        let losers = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| match board.register::<dyn TickListener, Tick>() {
                    Ok(()) => {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(err) => losers.lock().push(err.kind()),
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        let losers = losers.into_inner();
        assert_eq!(losers.len(), THREADS - 1);
        assert!(losers
            .iter()
            .all(|kind| *kind == ErrorKind::DuplicateRegistration));
        assert_eq!(board.binding_count(), 1);
    }

    #[test]
    fn test_concurrent_adds_of_one_listener_subscribe_once() {
        let board = tick_board();
        let counter = Arc::new(TickCounter::default());

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    assert_eq!(board.add_listener(&counter).unwrap(), 1);
                });
            }
        });

        assert_eq!(board.listener_count::<dyn TickListener>(), 1);
        assert_eq!(board.fire(&Tick { seq: 0 }).unwrap(), 1);
        assert_eq!(counter.ticks(), 1);
    }
}
