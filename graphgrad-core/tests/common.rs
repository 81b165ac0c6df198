use graphgrad_core::Tensor;

/// Routes `log` output through env_logger; safe to call from every test.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reads the single value of a one-element tensor's gradient.
#[allow(dead_code)]
pub fn grad_item(tensor: &Tensor) -> f64 {
    tensor
        .grad()
        .map(|g| g.sum())
        .unwrap_or_else(|e| panic!("expected a gradient: {}", e))
}
