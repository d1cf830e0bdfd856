// Copyright 2025 Cowboy AI, LLC.

use esm_compat::{ClientProfile, Engine, Resolver, ResolverConfig, Target, TargetResolution};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn resolver() -> Resolver {
    Resolver::builtin().expect("built-in table covers every engine")
}

fn chrome(version: &str) -> String {
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36"
    )
}

fn headless_chrome(version: &str) -> String {
    format!(
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) HeadlessChrome/{version} Safari/537.36"
    )
}

fn mac_safari(version: &str) -> String {
    format!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{version} Safari/605.1.15"
    )
}

fn iphone_safari(version: &str) -> String {
    format!(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{version} Mobile/15E148 Safari/604.1"
    )
}

fn firefox(version: &str) -> String {
    format!("Mozilla/5.0 (X11; Linux x86_64; rv:{version}) Gecko/20100101 Firefox/{version}")
}

#[test_case("" ; "empty user agent")]
#[test_case("curl/7.64.1" ; "curl")]
#[test_case("curl/8.4.0" ; "newer curl")]
#[test_case("Wget/1.21.4" ; "wget")]
fn cli_tools_get_the_most_permissive_target(ua: &str) {
    assert_eq!(resolver().resolve_user_agent(ua), Target::EsNext);
}

#[test_case("Deno/1.30.0", Target::Deno ; "below threshold")]
#[test_case("Deno/1.33.1", Target::Deno ; "just below threshold")]
#[test_case("Deno/1.33.2", Target::DenoNext ; "at threshold")]
#[test_case("Deno/1.40.5", Target::DenoNext ; "above threshold")]
#[test_case("Deno/2.0.0", Target::DenoNext ; "next major")]
#[test_case("Deno/1.33.2-rc.1", Target::Deno ; "prerelease sorts before release")]
#[test_case("Deno/canary", Target::DenoNext ; "unparsable version")]
#[test_case("Deno/", Target::DenoNext ; "missing version")]
fn deno_splits_on_threshold(ua: &str, expected: Target) {
    assert_eq!(resolver().resolve_user_agent(ua), expected);
}

#[test_case("Node/18.17.0" ; "node")]
#[test_case("Bun/1.0.3" ; "bun")]
#[test_case("undici" ; "undici")]
fn server_runtimes_are_evergreen(ua: &str) {
    assert_eq!(resolver().resolve_user_agent(ua), Target::Node);
}

#[test]
fn undici_must_match_exactly() {
    let resolver = resolver();
    assert_eq!(resolver.resolve_user_agent("undici/5.0"), Target::EsNext);
}

#[test_case(&chrome("120.0.6099"), Target::Es2022 ; "modern chrome")]
#[test_case(&chrome("91.0.4472"), Target::Es2022 ; "chrome 91")]
#[test_case(&chrome("90.0.4430"), Target::Es2021 ; "chrome 90")]
#[test_case(&chrome("70.0.3538"), Target::Es2019 ; "chrome 70")]
#[test_case(&chrome("63.0.3239"), Target::Es2018 ; "chrome 63")]
#[test_case(&chrome("55.0.2883"), Target::Es2017 ; "chrome 55")]
#[test_case(&chrome("51.0.2704"), Target::Es2016 ; "chrome 51")]
#[test_case(&chrome("50.0.2661"), Target::Es2015 ; "chrome 50 is the oldest rung")]
#[test_case(&chrome("49.0.2623"), Target::EsNext ; "chrome 49 falls off the ladder")]
#[test_case(&chrome("30"), Target::EsNext ; "ancient chrome")]
#[test_case(&mac_safari("16.5"), Target::Es2022 ; "safari 16")]
#[test_case(&mac_safari("14.1"), Target::Es2021 ; "safari 14")]
#[test_case(&mac_safari("13.1"), Target::Es2019 ; "safari 13")]
#[test_case(&mac_safari("10.1"), Target::Es2015 ; "safari 10")]
#[test_case(&iphone_safari("16.5"), Target::Es2022 ; "ios 16")]
#[test_case(&iphone_safari("10.1"), Target::EsNext ; "ios 10")]
#[test_case(&firefox("115.0"), Target::Es2022 ; "firefox 115")]
#[test_case(&firefox("80.0"), Target::Es2021 ; "firefox 80")]
#[test_case(&firefox("60.0"), Target::Es2017 ; "firefox 60")]
#[test_case(&firefox("52.0"), Target::EsNext ; "firefox 52")]
fn browsers_resolve_along_the_ladder(ua: &str, expected: Target) {
    assert_eq!(resolver().resolve_user_agent(ua), expected);
}

#[test]
fn legacy_edge_resolves_as_edge() {
    let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36 Edge/18.19041";
    let resolver = resolver();
    assert_eq!(
        resolver.classify(ua),
        ClientProfile::Browser {
            engine: Engine::Edge,
            version: "18.19041".into()
        }
    );
    assert_eq!(resolver.resolve_user_agent(ua), Target::Es2017);
}

#[test]
fn chromium_opera_uses_opr_token() {
    let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/73.0.3683.103 Safari/537.36 OPR/60.0.3255";
    let resolver = resolver();
    assert_eq!(
        resolver.classify(ua),
        ClientProfile::Browser {
            engine: Engine::Opera,
            version: "60.0.3255".into()
        }
    );
    assert_eq!(resolver.resolve_user_agent(ua), Target::Es2020);
}

#[test]
fn four_part_versions_degrade_to_unconstrained() {
    // Real Chrome builds report four groups, which the version grammar rejects.
    let resolver = resolver();
    assert_eq!(
        resolver.resolve_user_agent(&chrome("49.0.2623.112")),
        Target::Es2022
    );
}

#[test]
fn headless_and_headed_chrome_agree() {
    let resolver = resolver();
    for version in ["55.0.2883", "63.0.3239", "90.0.4430", "114.0.5735"] {
        assert_eq!(
            resolver.resolve_user_agent(&headless_chrome(version)),
            resolver.resolve_user_agent(&chrome(version)),
            "version {version}"
        );
    }
}

#[test]
fn iphone_uses_the_ios_profile() {
    let resolver = resolver();
    match resolver.classify(&iphone_safari("10.1")) {
        ClientProfile::Browser { engine, .. } => assert_eq!(engine, Engine::Ios),
        other => panic!("expected a browser profile, got {other:?}"),
    }
    assert_ne!(
        resolver.resolve_user_agent(&iphone_safari("10.1")),
        resolver.resolve_user_agent(&mac_safari("10.1"))
    );
}

#[test_case("Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Netscape/9.0.0" ; "fictitious gecko browser")]
#[test_case("Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko" ; "internet explorer")]
#[test_case("Mozilla/5.0 AppleWebKit/537.36 (KHTML, like Gecko; compatible; Googlebot/2.1; +http://www.google.com/bot.html) Chrome/120.0.0.0 Safari/537.36" ; "googlebot")]
#[test_case("Opera/9.80 (X11; Linux x86_64) Presto/2.12.388 Version/12.16" ; "presto opera")]
#[test_case("some-internal-healthcheck" ; "opaque token")]
fn unrecognised_clients_fall_back(ua: &str) {
    assert_eq!(resolver().resolve_user_agent(ua), Target::EsNext);
}

#[test]
fn explain_reports_counts_for_ladder_rungs() {
    let resolver = resolver();
    let profile = resolver.classify(&chrome("63.0.3239"));
    match resolver.explain(&profile) {
        TargetResolution::Rung {
            target,
            client_unsupported,
            target_unsupported,
        } => {
            assert_eq!(target, Target::Es2018);
            assert!(client_unsupported <= target_unsupported);
            assert_eq!(target_unsupported, resolver.unsupported_for_target(Target::Es2018));
        }
        other => panic!("expected a ladder rung, got {other:?}"),
    }
}

#[test]
fn explain_reports_fallback_counts() {
    let resolver = resolver();
    let resolution = resolver.explain(&resolver.classify(&chrome("30")));
    let oldest = resolver.unsupported_for_target(Target::Es2015);
    match resolution {
        TargetResolution::Fallback { client_unsupported } => assert!(client_unsupported > oldest),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(resolution.target(), Target::EsNext);
}

#[test]
fn configured_threshold_moves_the_deno_boundary() {
    let config = ResolverConfig::from_json_str(r#"{"deno_next_threshold": "1.40.0"}"#).unwrap();
    let resolver = Resolver::new(esm_compat::CompatTable::builtin(), &config).unwrap();
    assert_eq!(resolver.resolve_user_agent("Deno/1.39.9"), Target::Deno);
    assert_eq!(resolver.resolve_user_agent("Deno/1.40.0"), Target::DenoNext);
}

#[test]
fn configured_cli_prefixes_replace_defaults() {
    let config = ResolverConfig {
        cli_tool_prefixes: vec!["HTTPie/".into()],
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(esm_compat::CompatTable::builtin(), &config).unwrap();
    assert_eq!(resolver.resolve_user_agent("HTTPie/3.2.2"), Target::EsNext);
    assert_eq!(
        resolver.classify("HTTPie/3.2.2"),
        ClientProfile::literal(Target::EsNext)
    );
}

#[test]
fn resolve_engine_accepts_node_constraints() {
    let resolver = resolver();
    assert_eq!(resolver.resolve_engine(Engine::Node, "16"), Target::Es2022);
    assert_eq!(resolver.resolve_engine(Engine::Node, "10"), Target::Es2019);
    assert_eq!(resolver.resolve_engine(Engine::Node, "5"), Target::EsNext);
}
