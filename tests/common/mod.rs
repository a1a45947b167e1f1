pub fn init() {
    #[cfg(feature = "logger")]
    let _ = env_logger::builder()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{}", record.args())
        })
        .is_test(true)
        .try_init();
}
