pub mod events;
pub mod game;
pub mod helpers;
pub mod model;

#[cfg(test)]
mod tests {
    use std::sync::Once;
    use test_context::TestContext;

    static INIT_LOGGER: Once = Once::new();

    pub struct UsingLogger {
        _value: String,
    }

    impl TestContext for UsingLogger {
        fn setup() -> UsingLogger {
            INIT_LOGGER.call_once(|| {
                let _ = env_logger::builder().is_test(true).try_init();
            });

            UsingLogger {
                _value: "Om".to_string(),
            }
        }

        fn teardown(self) {}
    }
}
