use astrium_core::api::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Config {
    app_name: String,
}

struct Logger {
    lines: std::sync::Mutex<Vec<String>>,
}

impl Logger {
    fn log(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

struct HoroscopeController {
    config: Arc<Config>,
    logger: Arc<Logger>,
}

/// Full bootstrap-then-serve flow: register the framework services, then
/// resolve a controller and observe its autowired dependencies.
#[test]
fn test_container_wires_a_controller_graph() {
    let container = Container::new();

    // Bootstrap phase.
    container.instance(
        "config",
        Arc::new(Config {
            app_name: "astrium".to_string(),
        }),
    );
    container.singleton(
        "logger",
        Recipe::factory(|_, _| {
            Ok(Arc::new(Logger {
                lines: std::sync::Mutex::new(Vec::new()),
            }) as Value)
        }),
    );
    container.register_class(
        "HoroscopeController",
        ClassSpec::builder()
            .param("config", "config")
            .param("logger", "logger")
            .construct(|args| {
                Ok(Arc::new(HoroscopeController {
                    config: downcast_value::<Config>(&args[0])?,
                    logger: downcast_value::<Logger>(&args[1])?,
                }) as Value)
            }),
    );
    container.bind(
        "controller.horoscope",
        Recipe::class("HoroscopeController"),
        false,
    );

    // Serving phase.
    let controller = container.make("controller.horoscope").unwrap();
    let controller = downcast_value::<HoroscopeController>(&controller).unwrap();
    assert_eq!(controller.config.app_name, "astrium");

    controller.logger.log("resolved");
    let logger = container.make("logger").unwrap();
    let logger = downcast_value::<Logger>(&logger).unwrap();
    assert_eq!(logger.lines.lock().unwrap().len(), 1);
}

#[test]
fn test_handler_dispatch_through_invoker() {
    let container = Container::new();
    container.singleton(
        "logger",
        Recipe::factory(|_, _| {
            Ok(Arc::new(Logger {
                lines: std::sync::Mutex::new(Vec::new()),
            }) as Value)
        }),
    );

    let handler = FunctionSpec::builder("show_sign")
        .param("logger", "logger")
        .untyped_param("sign")
        .invoke(|args| {
            let logger = downcast_value::<Logger>(&args[0])?;
            let sign = downcast_value::<String>(&args[1])?;
            logger.log(&format!("serving {}", sign));
            Ok(Arc::new(format!("horoscope for {}", sign)) as Value)
        });

    let params: Overrides = HashMap::from([(
        "sign".to_string(),
        Arc::new("aries".to_string()) as Value,
    )]);
    let response = container.call(&handler, &params).unwrap();
    assert_eq!(
        *downcast_value::<String>(&response).unwrap(),
        "horoscope for aries"
    );

    let logger = container.make("logger").unwrap();
    let logger = downcast_value::<Logger>(&logger).unwrap();
    assert_eq!(logger.lines.lock().unwrap()[0], "serving aries");
}

#[test]
fn test_tagged_providers_boot_in_registration_order() {
    let boot_order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let container = Container::new();

    for name in ["provider.session", "provider.cache", "provider.validation"] {
        let boot_order = boot_order.clone();
        container.singleton(
            name,
            Recipe::factory(move |_, _| {
                boot_order.lock().unwrap().push(name);
                Ok(Arc::new(()) as Value)
            }),
        );
    }
    container.tag(
        &["provider.session", "provider.cache", "provider.validation"],
        "providers",
    );

    let providers = container.tagged("providers").unwrap();
    assert_eq!(providers.len(), 3);
    assert_eq!(
        *boot_order.lock().unwrap(),
        vec!["provider.session", "provider.cache", "provider.validation"]
    );
}

#[test]
fn test_decorated_singleton_observed_by_all_threads() {
    let decorations = Arc::new(AtomicUsize::new(0));
    let container = Arc::new(Container::new());
    container.singleton("greeting", Recipe::literal("hello".to_string()));
    container.extend("greeting", {
        let decorations = decorations.clone();
        move |value, _| {
            decorations.fetch_add(1, Ordering::SeqCst);
            let s = downcast_value::<String>(&value).unwrap();
            Arc::new(format!("{}, stargazer", s)) as Value
        }
    });

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let container = container.clone();
            std::thread::spawn(move || container.make("greeting").unwrap())
        })
        .collect();

    for handle in handles {
        let value = handle.join().unwrap();
        assert_eq!(
            *downcast_value::<String>(&value).unwrap(),
            "hello, stargazer"
        );
    }
    // Extenders run once; the decorated value is what got cached.
    assert_eq!(decorations.load(Ordering::SeqCst), 1);
}
