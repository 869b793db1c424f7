use anyhow::Result;
use httpmock::prelude::*;
use places_actions::core::actions::{
    Action, BeginningSearchAction, PlacesSearchAction, ValidateSlotsAction,
    WRONG_ADDRESS_TEMPLATE,
};
use places_actions::core::search::NO_RESULTS_FALLBACK;
use places_actions::domain::model::{slots, SlotValue};
use places_actions::utils::validation::Validate;
use places_actions::{
    CollectingDispatcher, InMemoryTracker, NominatimGeocoder, PlacesSearchClient, SlotValidator,
    TomlConfig, Tracker, Utterance,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// 建立指向 mock server 的 TOML 配置（API key 由環境變數注入）
fn config_for(server: &MockServer, key_var: &str) -> Result<TomlConfig> {
    let mut temp_file = NamedTempFile::new()?;
    let toml_content = format!(
        r#"
[search]
endpoint = "{}"
api_key = "${{{}}}"

[geocoder]
endpoint = "{}"
user_agent = "places-actions-test"
reverse_min_interval_ms = 100
"#,
        server.url("/v3/places/search"),
        key_var,
        server.url("")
    );
    temp_file.write_all(toml_content.as_bytes())?;

    let config = TomlConfig::from_file(temp_file.path())?;
    config.validate()?;
    Ok(config)
}

fn geocoder_for(server: &MockServer) -> NominatimGeocoder {
    NominatimGeocoder::new(
        server.url(""),
        "places-actions-test",
        Duration::from_millis(1),
    )
    .unwrap()
}

fn filled_tracker(address: &str, radius: &str, place_type: &str) -> InMemoryTracker {
    let mut tracker = InMemoryTracker::new();
    tracker.set(
        slots::ADDRESS,
        SlotValue::Tokens(vec![address.to_string()]),
    );
    tracker.set(slots::RADIUS, SlotValue::text(radius));
    tracker.set(slots::PLACE_TYPE, SlotValue::text(place_type));
    tracker
}

/// 完整流程：驗證槽位 → 宣告搜尋 → 呼叫 places API → 回覆格式化
#[tokio::test]
async fn test_full_search_flow() -> Result<()> {
    std::env::set_var("TEST_FLOW_API_KEY", "fsq-integration-key");
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "New York");
        then.status(200).json_body(serde_json::json!([
            {"lat": "40.7", "lon": "-74.0", "display_name": "New York, USA"}
        ]));
    });

    let places_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v3/places/search")
            .header("Authorization", "fsq-integration-key")
            .query_param("ll", "40.7,-74.0")
            .query_param("radius", "50000")
            .query_param("categories", "13065,13032");
        then.status(200).json_body(serde_json::json!({
            "results": [
                {
                    "name": "Joe's Coffee",
                    "geocodes": {"main": {"latitude": 40.71, "longitude": -74.01}},
                    "distance": 1500
                },
                {
                    "name": "Corner Bistro",
                    "geocodes": {"main": {"latitude": 40.72, "longitude": -74.02}},
                    "distance": 2300
                }
            ]
        }));
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/reverse")
            .query_param("lat", "40.71");
        then.status(200)
            .json_body(serde_json::json!({"display_name": "44 W 4th St, New York"}));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/reverse")
            .query_param("lat", "40.72");
        then.status(200)
            .json_body(serde_json::json!({"display_name": "331 W 4th St, New York"}));
    });

    let config = config_for(&server, "TEST_FLOW_API_KEY")?;
    let geocoder = geocoder_for(&server);
    let mut tracker = filled_tracker("New York", "fifty", "both restaurants and coffee houses");
    let mut dispatcher = CollectingDispatcher::new();

    // 驗證槽位
    let validate = ValidateSlotsAction::new(SlotValidator::new(geocoder.clone()));
    let updates = validate.run(&mut dispatcher, &tracker).await?;
    tracker.apply(updates);

    assert_eq!(
        tracker.get_slot(slots::LAT_LON),
        Some(&SlotValue::text("40.7,-74.0"))
    );
    assert_eq!(
        tracker.get_slot(slots::RADIUS),
        Some(&SlotValue::text("50.0"))
    );

    // 宣告 + 搜尋
    BeginningSearchAction.run(&mut dispatcher, &tracker).await?;
    let search = PlacesSearchAction::new(PlacesSearchClient::new(geocoder, config));
    search.run(&mut dispatcher, &tracker).await?;

    places_mock.assert();

    let messages = dispatcher.drain();
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0],
        Utterance::Text(
            "Looking for both restaurants and coffee houses in New York \
             with a search radius of 50.0 km"
                .to_string()
        )
    );
    // 回覆保持 API 的排序，距離以公里呈現
    assert_eq!(
        messages[1],
        Utterance::Text(
            "Name: Joe's Coffee\nAddress: 44 W 4th St, New York\nDistance: 1.5 km\n\n\
             Name: Corner Bistro\nAddress: 331 W 4th St, New York\nDistance: 2.3 km"
                .to_string()
        )
    );

    std::env::remove_var("TEST_FLOW_API_KEY");
    Ok(())
}

/// 地址無法辨識：清除槽位並送出 wrong-address 通知，不進行搜尋
#[tokio::test]
async fn test_unknown_address_clears_slot() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(serde_json::json!([]));
    });

    let geocoder = geocoder_for(&server);
    let mut tracker = filled_tracker("Nowhereville", "ten", "restaurants");
    let mut dispatcher = CollectingDispatcher::new();

    let validate = ValidateSlotsAction::new(SlotValidator::new(geocoder));
    let updates = validate.run(&mut dispatcher, &tracker).await?;
    tracker.apply(updates);

    assert!(!tracker.has_slot(slots::ADDRESS));
    assert!(!tracker.has_slot(slots::LAT_LON));
    assert_eq!(
        dispatcher.messages()[0],
        Utterance::Template(WRONG_ADDRESS_TEMPLATE.to_string())
    );
    Ok(())
}

/// places API 失效時回覆固定的 fallback 文字，錯誤不外洩
#[tokio::test]
async fn test_places_api_failure_yields_fallback_reply() -> Result<()> {
    std::env::set_var("TEST_FALLBACK_API_KEY", "fsq-fallback-key");
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v3/places/search");
        then.status(502);
    });

    let config = config_for(&server, "TEST_FALLBACK_API_KEY")?;
    let geocoder = geocoder_for(&server);
    let mut tracker = filled_tracker("New York", "2.0", "coffee houses");
    tracker.set(slots::LAT_LON, SlotValue::text("40.7,-74.0"));
    let mut dispatcher = CollectingDispatcher::new();

    let search = PlacesSearchAction::new(PlacesSearchClient::new(geocoder, config));
    search.run(&mut dispatcher, &tracker).await?;

    assert_eq!(
        dispatcher.messages(),
        &[Utterance::Text(NO_RESULTS_FALLBACK.to_string())]
    );

    std::env::remove_var("TEST_FALLBACK_API_KEY");
    Ok(())
}
