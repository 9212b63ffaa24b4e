use std::time::Instant;

use log::info;

/// Run `f`, logging how long it took under `label`. The result is returned
/// as-is, errors included
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let out = f();
    info!(
        "Finished {} in {:.4} secs",
        label,
        started.elapsed().as_secs_f64()
    );
    out
}
