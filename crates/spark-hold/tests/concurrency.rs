//! 并发增删与模式切换测试。
//!
//! # 教案级导览
//!
//! - **Why**：呼叫建立、拆除与射频模式通知可能来自不同线程，追踪器必须保证“变更 + 重算”是原子步骤，
//!   否则最后写入的标记可能基于过期的分组成员计算。
//! - **How**：多个线程围绕同一组订阅反复增删各自的呼叫腿，结束后不再调用任何重算；
//!   每个分组的最后一次变更必然基于最终成员写入了全部标记，因此可以直接断言。
//! - **What**：剩余顶层呼叫的标记等于 `顶层数量 <= 限额`，子腿恒为 `false`。

use std::{
    sync::{Arc, Barrier},
    thread,
};

use spark_hold::{
    HoldCapability, HoldLimits, HoldTracker, LegRef, MultiSimMode, RadioModeProbe,
    SharedRadioState, SubscriptionKey,
};

const WORKERS: usize = 8;
const ROUNDS: usize = 200;

fn subscription(index: usize) -> SubscriptionKey {
    SubscriptionKey::new(format!("sim-{}", index % 2))
}

#[test]
fn final_flags_match_final_membership() {
    let radio = Arc::new(SharedRadioState::new(MultiSimMode::IndependentRadio));
    let tracker = Arc::new(HoldTracker::<SubscriptionKey>::new(radio.clone()));
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let tracker = Arc::clone(&tracker);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = subscription(worker);
                let transient: LegRef = Arc::new(HoldCapability::top_level());
                let kept = if worker % 3 == 0 {
                    Arc::new(HoldCapability::child())
                } else {
                    Arc::new(HoldCapability::top_level())
                };

                barrier.wait();
                for _ in 0..ROUNDS {
                    tracker.add_leg(key.clone(), transient.clone());
                    tracker.remove_leg(&key, &transient);
                }
                // 仅 0、1 号线程留下常驻呼叫腿。
                if worker < 2 {
                    tracker.add_leg(key.clone(), kept.clone());
                }
                (key, kept)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker must not panic"))
        .collect();

    let limits = HoldLimits::default();
    for (worker, (key, kept)) in results.iter().enumerate() {
        if worker >= 2 {
            continue;
        }
        assert_eq!(tracker.group_len(key), Some(1));
        let expected = worker % 3 != 0 && limits.admits(1, radio.snapshot());
        assert_eq!(kept.is_holdable(), expected, "worker {worker}");
    }
}

#[test]
fn mode_flips_during_mutation_converge_after_recompute_all() {
    let radio = Arc::new(SharedRadioState::new(MultiSimMode::IndependentRadio));
    let tracker = Arc::new(HoldTracker::<SubscriptionKey>::new(radio.clone()));

    let resident: Vec<_> = (0..4)
        .map(|index| {
            let leg = Arc::new(HoldCapability::top_level());
            tracker.add_leg(subscription(index), leg.clone());
            leg
        })
        .collect();

    let flipper = {
        let radio = Arc::clone(&radio);
        let tracker = Arc::clone(&tracker);
        thread::spawn(move || {
            for round in 0..ROUNDS {
                radio.set_mode(if round % 2 == 0 {
                    MultiSimMode::SharedRadio
                } else {
                    MultiSimMode::IndependentRadio
                });
                tracker.recompute_all();
            }
        })
    };

    let churn = {
        let tracker = Arc::clone(&tracker);
        thread::spawn(move || {
            let leg: LegRef = Arc::new(HoldCapability::top_level());
            for round in 0..ROUNDS {
                let key = subscription(round);
                tracker.add_leg(key.clone(), leg.clone());
                tracker.remove_leg(&key, &leg);
            }
        })
    };

    flipper.join().expect("flipper must not panic");
    churn.join().expect("churn must not panic");

    radio.set_mode(MultiSimMode::SharedRadio);
    assert_eq!(tracker.recompute_all(), 2);
    assert!(resident.iter().all(|leg| !leg.is_holdable()));

    radio.set_mode(MultiSimMode::IndependentRadio);
    tracker.recompute_all();
    assert!(resident.iter().all(|leg| leg.is_holdable()));
}
