//! # 呼叫腿保持能力契约（Holdable）
//!
//! ## 核心意图（Why）
//! - 追踪器并不拥有呼叫腿，只在其注册期间持有共享引用，并在重算后写回“是否允许保持”标记；
//! - 宿主电话栈以何种结构表示呼叫腿与本模块无关，只需实现 [`Holdable`] 即可接入。
//!
//! ## 行为契约（What）
//! - [`Holdable::kind`] 报告呼叫腿当前属于顶层呼叫还是会议子腿；
//! - [`Holdable::set_holdable`] 由追踪器在重算期间调用，实现方必须使用内部可变性；
//! - 两个方法都在追踪器持有分片锁时被调用，实现方不得回调追踪器。

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// 呼叫腿的种类。
///
/// # 教案式说明
/// - **意图 (Why)**：区分用户直接可见的顶层呼叫与已并入会议的子腿；子腿不计入限额，且一律不可保持；
/// - **契约 (What)**：满足 `Copy + Eq + Hash`，可直接作为日志字段或映射键。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LegKind {
    /// 用户直接控制的顶层呼叫。
    TopLevel,
    /// 已合并会议中的参与方。
    Child,
}

/// 可被保持的呼叫腿。
pub trait Holdable: Send + Sync {
    /// 呼叫腿当前的种类。
    fn kind(&self) -> LegKind;

    /// 是否为会议子腿。
    fn is_child(&self) -> bool {
        self.kind() == LegKind::Child
    }

    /// 写入当前是否允许保持。
    fn set_holdable(&self, holdable: bool);
}

/// 追踪器持有的呼叫腿共享引用。
pub type LegRef = Arc<dyn Holdable>;

/// 按对象身份判断两条引用是否指向同一呼叫腿。
///
/// 只比较数据指针，忽略 vtable，避免同一对象经不同代码生成单元擦除后被误判为不同呼叫腿。
pub(crate) fn same_leg(a: &LegRef, b: &LegRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// 基于原子变量的现成 [`Holdable`] 实现。
///
/// # 教案式说明
/// - **意图 (Why)**：宿主可以把该结构嵌入自身的呼叫对象，免去重复编写内部可变性样板；
/// - **契约 (What)**：
///   - 新建时保持标记为 `false`，直到追踪器首次重算；
///   - [`set_kind`](Self::set_kind) 用于呼叫并入/移出会议，修改后需由调用方对所属订阅执行
///     [`HoldTracker::recompute`](crate::core::tracker::HoldTracker::recompute)；
/// - **风险 (Trade-offs)**：各字段独立原子读写，不提供“种类 + 标记”的组合快照。
#[derive(Debug)]
pub struct HoldCapability {
    child: AtomicBool,
    holdable: AtomicBool,
}

impl HoldCapability {
    /// 构造指定种类的呼叫腿能力。
    pub fn new(kind: LegKind) -> Self {
        Self {
            child: AtomicBool::new(kind == LegKind::Child),
            holdable: AtomicBool::new(false),
        }
    }

    /// 构造顶层呼叫腿。
    pub fn top_level() -> Self {
        Self::new(LegKind::TopLevel)
    }

    /// 构造会议子腿。
    pub fn child() -> Self {
        Self::new(LegKind::Child)
    }

    /// 修改呼叫腿种类。
    pub fn set_kind(&self, kind: LegKind) {
        self.child.store(kind == LegKind::Child, Ordering::Release);
    }

    /// 最近一次写入的保持标记。
    pub fn is_holdable(&self) -> bool {
        self.holdable.load(Ordering::Acquire)
    }
}

impl Holdable for HoldCapability {
    fn kind(&self) -> LegKind {
        if self.child.load(Ordering::Acquire) {
            LegKind::Child
        } else {
            LegKind::TopLevel
        }
    }

    fn set_holdable(&self, holdable: bool) {
        self.holdable.store(holdable, Ordering::Release);
    }
}
