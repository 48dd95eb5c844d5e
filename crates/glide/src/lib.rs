//! Small tweening engine: eased property tweens, timelines with explicit start
//! offsets, per-target cancellation and quick retargeting. Values live in the
//! [`Animator`]; the host advances it from its frame clock with
//! [`Animator::tick`].

pub mod animator;
pub mod ease;
pub mod timeline;
pub mod tween;

pub use animator::{AnimationId, Animator, QuickTo, Tweener};
pub use ease::{Ease, lerp};
pub use timeline::Timeline;
pub use tween::{Repeat, Tween};
