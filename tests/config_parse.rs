use mc_pi::{
    config::{Config, OutputFormat},
    job::RemainderPolicy,
};

#[test]
fn parse_example_config() {
    let raw = include_str!("../mc-pi.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.output.precision, 12);
    assert_eq!(cfg.sampling.remainder, RemainderPolicy::Drop);
    assert!(cfg.sampling.seed.is_none());
}

#[test]
fn partial_sections_fall_back_to_defaults() {
    let raw = "[sampling]\nseed = 7\nremainder = \"last_worker\"\n\n[output]\nformat = \"json\"\n";
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.sampling.seed, Some(7));
    assert_eq!(cfg.sampling.remainder, RemainderPolicy::LastWorker);
    assert_eq!(cfg.output.format, OutputFormat::Json);
    assert_eq!(cfg.output.precision, 12);
    assert_eq!(cfg.output.reference_pi, std::f64::consts::PI);
    assert_eq!(cfg.input.max_attempts, 3);
    assert!(cfg.intro.confirm);
}

#[test]
fn rejects_zero_attempts_and_excess_precision() {
    let mut cfg = Config::default();
    cfg.input.max_attempts = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.output.precision = 30;
    assert!(cfg.validate().is_err());
}

#[test]
fn effective_config_round_trips_through_toml() {
    let mut cfg = Config::default();
    cfg.sampling.seed = Some(99);
    let back: Config = toml::from_str(&cfg.to_toml()).expect("parse TOML");
    assert_eq!(back.sampling.seed, Some(99));
    assert_eq!(back.logging.level, "warn");
}
