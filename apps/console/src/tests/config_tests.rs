use super::*;

#[test]
fn env_overrides_take_precedence_over_defaults() {
    let settings = load_settings();
    assert_eq!(settings.node_url, "wss://testnet.vara.network");
    assert_eq!(settings.program_id, DEFAULT_PROGRAM_ID);
    assert!(settings.backend_url.is_none());
    assert!(settings.account.is_none());

    env::set_var("APP__NODE_ADDRESS", "ws://127.0.0.1:9944");
    env::set_var("BACKEND_ADDRESS", "http://127.0.0.1:3001");
    let settings = load_settings();
    env::remove_var("APP__NODE_ADDRESS");
    env::remove_var("BACKEND_ADDRESS");

    assert_eq!(settings.node_url, "ws://127.0.0.1:9944");
    assert_eq!(
        settings.backend_url.as_deref(),
        Some("http://127.0.0.1:3001")
    );
}

#[test]
fn page_selects_its_interface_description() {
    let settings = Settings::default();

    let ping = contract_config(&settings, PageKind::PingPong).expect("ping config");
    assert!(ping.idl.contains("service Ping"));
    assert_eq!(ping.program_id.as_str(), DEFAULT_PROGRAM_ID);

    let traffic = contract_config(&settings, PageKind::TrafficLight).expect("traffic config");
    assert!(traffic.idl.contains("service TrafficLight"));
}

#[test]
fn invalid_node_address_is_rejected() {
    let settings = Settings {
        node_url: "not a url".into(),
        ..Settings::default()
    };

    assert!(contract_config(&settings, PageKind::PingPong).is_err());
}
