//! Busy-wait sleep.
//!
//! Nothing exists yet to yield to at this layer, so sleeping means polling
//! the tick source until a deadline passes. The core stays fully awake.

use crate::timebase::TickSource;

/// Block until at least `d` ticks have elapsed.
///
/// Zero returns at once, without sampling the counter.
pub fn sleep_ticks<T: TickSource + ?Sized>(clock: &T, d: u64) {
    if d == 0 {
        return;
    }

    let deadline = clock.ticks().saturating_add(d);
    while clock.ticks() < deadline {
        // TODO: wfi on a timer alarm here once the runtime installs a trap handler.
        core::hint::spin_loop();
    }
}
