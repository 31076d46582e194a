//! HoldTracker 性质验证
//!
//! # 教案级注释概览
//!
//! - **核心目标 (Why)**：以随机的“增删呼叫腿 / 切换射频模式 / 全量重算”事件序列驱动追踪器，
//!   与一份纯 Rust 影子模型对照，确认每次重算后的标记都与模型推导一致。
//! - **设计手法 (How)**：每条呼叫腿固定归属一个订阅（`leg % SUBSCRIPTIONS`），模型记录各分组的插入顺序；
//!   成员变化时只校验受影响的分组，全量重算后校验全部分组；被移除的呼叫腿标记必须保持原值。
//! - **合同与边界 (What)**：
//!   - 子腿标记恒为 `false`；
//!   - 同一分组的顶层呼叫标记一致，且等于 `顶层数量 <= 限额`；
//!   - 重复登记、移除非成员均不改变分组。

use std::sync::Arc;

use proptest::prelude::*;
use spark_hold::{
    HoldCapability, HoldLimits, HoldTracker, Holdable, LegKind, LegRef, MultiSimMode,
    RadioModeProbe, SharedRadioState,
};

const LEGS: usize = 8;
const SUBSCRIPTIONS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    SetMode { independent: bool, widened: bool },
    RecomputeAll,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..LEGS).prop_map(Op::Add),
        2 => (0..LEGS).prop_map(Op::Remove),
        1 => (any::<bool>(), any::<bool>())
            .prop_map(|(independent, widened)| Op::SetMode { independent, widened }),
        1 => Just(Op::RecomputeAll),
    ]
}

struct Harness {
    tracker: HoldTracker<usize>,
    radio: Arc<SharedRadioState>,
    legs: Vec<Arc<HoldCapability>>,
    groups: Vec<Vec<usize>>,
}

impl Harness {
    fn new(children: &[bool]) -> Self {
        let radio = Arc::new(SharedRadioState::new(MultiSimMode::SharedRadio));
        let legs = children
            .iter()
            .map(|child| {
                Arc::new(HoldCapability::new(if *child {
                    LegKind::Child
                } else {
                    LegKind::TopLevel
                }))
            })
            .collect();
        Self {
            tracker: HoldTracker::new(radio.clone()),
            radio,
            legs,
            groups: vec![Vec::new(); SUBSCRIPTIONS],
        }
    }

    fn leg_ref(&self, leg: usize) -> LegRef {
        self.legs[leg].clone()
    }

    fn assert_group(&self, subscription: usize) -> Result<(), TestCaseError> {
        let members = &self.groups[subscription];
        let top_level = members
            .iter()
            .filter(|leg| !self.legs[**leg].is_child())
            .count();
        let expected = HoldLimits::default().admits(top_level, self.radio.snapshot());

        prop_assert_eq!(self.tracker.group_len(&subscription), Some(members.len()));
        for leg in members {
            let capability = &self.legs[*leg];
            if capability.is_child() {
                prop_assert!(!capability.is_holdable(), "child leg {} must not be holdable", leg);
            } else {
                prop_assert_eq!(capability.is_holdable(), expected, "top-level leg {}", leg);
            }
        }
        Ok(())
    }
}

proptest! {
    #[test]
    fn prop_flags_follow_shadow_model(
        children in prop::collection::vec(any::<bool>(), LEGS),
        ops in prop::collection::vec(op_strategy(), 1..64),
    ) {
        let mut harness = Harness::new(&children);

        for op in ops {
            match op {
                Op::Add(leg) => {
                    let subscription = leg % SUBSCRIPTIONS;
                    let fresh = !harness.groups[subscription].contains(&leg);
                    let changed = harness.tracker.add_leg(subscription, harness.leg_ref(leg));
                    prop_assert_eq!(changed, fresh);
                    if fresh {
                        harness.groups[subscription].push(leg);
                        harness.assert_group(subscription)?;
                    }
                }
                Op::Remove(leg) => {
                    let subscription = leg % SUBSCRIPTIONS;
                    let before = harness.legs[leg].is_holdable();
                    let position = harness.groups[subscription].iter().position(|m| *m == leg);
                    let changed = harness.tracker.remove_leg(&subscription, &harness.leg_ref(leg));
                    prop_assert_eq!(changed, position.is_some());
                    prop_assert_eq!(harness.legs[leg].is_holdable(), before);
                    if let Some(position) = position {
                        harness.groups[subscription].remove(position);
                        harness.assert_group(subscription)?;
                    }
                }
                Op::SetMode { independent, widened } => {
                    harness.radio.set_mode(if independent {
                        MultiSimMode::IndependentRadio
                    } else {
                        MultiSimMode::SharedRadio
                    });
                    harness.radio.set_multiple_held_calls(widened);
                }
                Op::RecomputeAll => {
                    let known = harness.tracker.len();
                    prop_assert_eq!(harness.tracker.recompute_all(), known);
                    for subscription in harness.tracker.subscriptions() {
                        harness.assert_group(subscription)?;
                    }
                }
            }
        }
    }

    #[test]
    fn prop_children_never_count_toward_the_limit(children in 0usize..16) {
        let radio = Arc::new(SharedRadioState::new(MultiSimMode::IndependentRadio));
        let tracker: HoldTracker<&str> = HoldTracker::new(radio);
        let tops: Vec<_> = (0..2).map(|_| Arc::new(HoldCapability::top_level())).collect();
        let kids: Vec<_> = (0..children).map(|_| Arc::new(HoldCapability::child())).collect();

        for leg in tops.iter().chain(&kids) {
            tracker.add_leg("sim-1", leg.clone());
        }

        prop_assert!(tops.iter().all(|leg| leg.is_holdable()));
        prop_assert!(kids.iter().all(|leg| !leg.is_holdable()));
    }
}
