use emberweb::config::Config;
use std::sync::Mutex;
use std::time::Duration;

// Tests mutate process-wide env vars; serialize them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn test_config_default_address() {
    let _guard = ENV_LOCK.lock().unwrap();
    // When LISTEN env var is not set, should use default
    unsafe {
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load();
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
}

#[test]
fn test_config_default_timeout() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::remove_var("TIMEOUT");
    }
    let cfg = Config::load();
    assert_eq!(cfg.timeout, Duration::from_secs(30));
}

#[test]
fn test_config_custom_address_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }
    let cfg = Config::load();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    unsafe {
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_custom_timeout_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::set_var("TIMEOUT", "5");
    }
    let cfg = Config::load();
    assert_eq!(cfg.timeout, Duration::from_secs(5));
    unsafe {
        std::env::remove_var("TIMEOUT");
    }
}

#[test]
fn test_config_unparsable_timeout_falls_back() {
    let _guard = ENV_LOCK.lock().unwrap();
    unsafe {
        std::env::set_var("TIMEOUT", "soon");
    }
    let cfg = Config::load();
    assert_eq!(cfg.timeout, Duration::from_secs(30));
    unsafe {
        std::env::remove_var("TIMEOUT");
    }
}

#[test]
fn test_config_clone() {
    let _guard = ENV_LOCK.lock().unwrap();
    let cfg1 = Config::load();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.timeout, cfg2.timeout);
}
