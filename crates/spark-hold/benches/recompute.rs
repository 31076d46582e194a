use criterion::Criterion;
use spark_hold::{HoldCapability, HoldTracker, LegRef, MultiSimMode, SharedRadioState};
use std::{env, hint::black_box, sync::Arc, time::Duration};

/// 基准：衡量保持能力重算的成本。
///
/// # 设计背景（Why）
/// - 每次呼叫腿增删都在分片写锁内完成重算，重算耗时直接决定并发事件的排队时间；
/// - 典型场景下每个订阅只有少量呼叫腿，基准覆盖“增删一条腿”与“射频模式切换后全量重算”两条路径。
fn bench_recompute(c: &mut Criterion) {
    let radio = Arc::new(SharedRadioState::new(MultiSimMode::SharedRadio));
    let tracker: HoldTracker<u32> = HoldTracker::new(radio.clone());
    for subscription in 0..2 {
        for _ in 0..3 {
            tracker.add_leg(subscription, Arc::new(HoldCapability::top_level()));
        }
        tracker.add_leg(subscription, Arc::new(HoldCapability::child()));
    }

    let leg: LegRef = Arc::new(HoldCapability::top_level());
    c.bench_function("add_remove_leg", |b| {
        b.iter(|| {
            tracker.add_leg(0, leg.clone());
            black_box(tracker.remove_leg(&0, &leg))
        });
    });

    c.bench_function("recompute_all", |b| {
        b.iter(|| black_box(tracker.recompute_all()));
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_recompute(&mut criterion);
    criterion.final_summary();
}
