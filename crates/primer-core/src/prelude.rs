pub use crate::clock::{Clock, ManualClock, Sleep, SystemClock, TimerHandle, Timers};
pub use crate::context::Context;
pub use crate::effects::{Dispose, EffectSlot, effect, on_unmount};
pub use crate::executor::Executor;
pub use crate::ids::IdGenerator;
pub use crate::lanes::{Deferred, Lanes, Transition};
pub use crate::memo::{Callback, Memo, memo_callback, same_callback};
pub use crate::scope::{Liveness, Scope, current_scope};
pub use crate::signal::{Signal, SubId, signal};
pub use crate::state::{Derived, MutRef, Reducer, Store, derived};
