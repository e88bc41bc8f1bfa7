#![allow(clippy::unwrap_used)]
// End-to-end tests for `Adapter` against a wiremock receiver.

use std::time::Duration;

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use enigmatv_core::{
    Adapter, BouquetScope, ChannelType, CoreError, DeviceConfig, NewTimer, Picon, TimerStatus,
};

const FAVOURITES: &str =
    "1:7:1:0:0:0:0:0:0:0:FROM BOUQUET \"userbouquet.favourites.tv\" ORDER BY bouquet";
const RADIO_BOUQUET: &str =
    "1:7:2:0:0:0:0:0:0:0:FROM BOUQUET \"userbouquet.favourites.radio\" ORDER BY bouquet";
const ERSTE: &str = "1:0:19:283D:3FB:1:C00000:0:0:0:";
const ZDF: &str = "1:0:19:2B66:3F3:1:C00000:0:0:0:";
const BAYERN3: &str = "1:0:2:6D66:437:1:C00000:0:0:0:RADIO";

// ── Helpers ─────────────────────────────────────────────────────────

fn xml(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml; charset=UTF-8")
        .set_body_string(body.into())
}

fn services(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(reference, name)| {
            format!(
                "<e2service><e2servicereference>{}</e2servicereference><e2servicename>{name}</e2servicename></e2service>",
                reference.replace('"', "&quot;")
            )
        })
        .collect();
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<e2servicelist>{items}</e2servicelist>")
}

fn simple_result(state: &str, text: &str) -> ResponseTemplate {
    xml(format!(
        "<e2simplexmlresult><e2state>{state}</e2state><e2statetext>{text}</e2statetext></e2simplexmlresult>"
    ))
}

fn config_for(server: &MockServer) -> DeviceConfig {
    let uri = Url::parse(&server.uri()).unwrap();
    DeviceConfig {
        host: uri.host_str().unwrap().to_owned(),
        web_port: uri.port(),
        ..DeviceConfig::default()
    }
}

async fn mount_bouquets(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param_is_missing("sRef"))
        .respond_with(xml(services(&[
            (FAVOURITES, "Favourites (TV)"),
            (RADIO_BOUQUET, "Favourites (Radio)"),
        ])))
        .mount(server)
        .await;
}

async fn mount_favourites(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param("sRef", FAVOURITES))
        .respond_with(xml(services(&[
            ("1:64:1:0:0:0:0:0:0:0:", "--- Public ---"),
            (ERSTE, "Das Erste HD"),
            ("1:64:2:0:0:0:0:0:0:0:", "--- Private ---"),
            (ZDF, "ZDF HD"),
        ])))
        .mount(server)
        .await;
}

async fn setup() -> (MockServer, Adapter) {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    let adapter = Adapter::new(config_for(&server)).unwrap();
    (server, adapter)
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn cancel() -> CancellationToken {
    CancellationToken::new()
}

// ── Session ─────────────────────────────────────────────────────────

#[test]
fn test_invalid_config_rejected_without_network() {
    let config = DeviceConfig {
        host: String::new(),
        ..DeviceConfig::default()
    };
    let result = Adapter::new(config);
    assert!(
        matches!(result, Err(CoreError::Configuration { .. })),
        "expected Configuration error"
    );
}

#[tokio::test]
async fn test_missing_bouquet_is_not_found() {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param("sRef", FAVOURITES))
        .respond_with(xml(services(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let config = DeviceConfig {
        bouquet: BouquetScope::Single("Sports".into()),
        ..config_for(&server)
    };
    let adapter = Adapter::new(config).unwrap();

    let result = adapter.list_channels(&cancel()).await;
    match result {
        Err(CoreError::NotFound { entity, identifier }) => {
            assert_eq!(entity, "bouquet");
            assert_eq!(identifier, "Sports");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_probe_failure_is_connectivity_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let adapter = Adapter::new(config_for(&server)).unwrap();

    let result = adapter.list_timers(&cancel()).await;
    assert!(
        matches!(result, Err(CoreError::Connectivity { .. })),
        "expected Connectivity error, got {result:?}"
    );
}

#[tokio::test]
async fn test_cancelled_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .respond_with(xml(services(&[])).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;
    let adapter = Adapter::new(config_for(&server)).unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let result = adapter.status(&token).await;
    assert!(matches!(result, Err(CoreError::Cancelled)), "got {result:?}");
}

// ── Channels ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_channels_single_bouquet() {
    let (server, adapter) = setup().await;
    mount_favourites(&server).await;

    assert!(adapter.catalog().is_empty());
    let channels = adapter.list_channels(&cancel()).await.unwrap();

    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].id, ERSTE);
    assert_eq!(channels[0].number, 1);
    assert_eq!(channels[1].name, "ZDF HD");
    assert_eq!(channels[1].number, 2);
    assert_eq!(channels[0].channel_type, ChannelType::Tv);
    assert_eq!(
        channels[0].picon,
        Picon::Url(format!(
            "{}/picon/1_0_19_283D_3FB_1_C00000_0_0_0.png",
            server.uri()
        ))
    );

    assert_eq!(adapter.catalog().len(), 2);
    assert!(adapter.catalog().last_refresh().is_some());
}

#[tokio::test]
async fn test_list_channels_all_bouquets() {
    let (server, _) = setup().await;
    mount_favourites(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param("sRef", RADIO_BOUQUET))
        .respond_with(xml(services(&[
            (BAYERN3, "Bayern 3"),
            (ERSTE, "Das Erste HD"),
        ])))
        .mount(&server)
        .await;

    let config = DeviceConfig {
        bouquet: BouquetScope::All,
        ..config_for(&server)
    };
    let adapter = Adapter::new(config).unwrap();
    let channels = adapter.list_channels(&cancel()).await.unwrap();

    let summary: Vec<(&str, u32)> = channels
        .iter()
        .map(|c| (c.name.as_str(), c.number))
        .collect();
    // Numbering restarts per bouquet; the repeated channel keeps its first entry.
    assert_eq!(
        summary,
        vec![("Das Erste HD", 1), ("ZDF HD", 2), ("Bayern 3", 1)]
    );
    assert_eq!(channels[2].channel_type, ChannelType::Radio);
    assert_eq!(adapter.catalog().len(), 3);
}

// ── Programs ────────────────────────────────────────────────────────

async fn mount_epg(server: &MockServer) {
    let event = |id: &str, start: &str, title: &str| {
        format!(
            "<e2event><e2eventid>{id}</e2eventid><e2eventstart>{start}</e2eventstart>\
             <e2eventduration>1800</e2eventduration><e2eventcurrenttime>1700000000</e2eventcurrenttime>\
             <e2eventtitle>{title}</e2eventtitle><e2eventdescription>short</e2eventdescription>\
             <e2eventdescriptionextended>{title} in detail</e2eventdescriptionextended>\
             <e2eventservicereference>{ERSTE}</e2eventservicereference>\
             <e2eventservicename>Das Erste HD</e2eventservicename></e2event>"
        )
    };
    let body = format!(
        "<e2eventlist>{}{}{}</e2eventlist>",
        event("101", "1700000000", "Tagesschau"),
        event("102", "1700001800", "Tatort"),
        event("103", "1700003600", "Tagesthemen"),
    );
    Mock::given(method("GET"))
        .and(path("/web/epgservice"))
        .and(query_param("sRef", ERSTE))
        .respond_with(xml(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_programs_window_and_picon() {
    let (server, adapter) = setup().await;
    mount_favourites(&server).await;
    mount_epg(&server).await;

    // Before the catalog is populated there is nothing to correlate with.
    let programs = adapter
        .list_programs(ERSTE, at(1_700_000_000), at(1_700_002_000), &cancel())
        .await
        .unwrap();
    assert_eq!(programs.len(), 2);
    assert!(programs.iter().all(|p| p.picon.is_none()));

    adapter.list_channels(&cancel()).await.unwrap();
    let programs = adapter
        .list_programs(ERSTE, at(1_700_000_000), at(1_700_002_000), &cancel())
        .await
        .unwrap();

    let titles: Vec<&str> = programs.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Tagesschau", "Tatort"]);
    assert_eq!(programs[0].overview, "Tagesschau in detail");
    assert_eq!(programs[0].end, at(1_700_001_800));
    assert_eq!(programs[1].id.event_id, "102");
    assert_eq!(programs[1].id.ordinal, 2);
    assert!(programs.iter().all(|p| p.picon.is_some()));
}

// ── Recordings ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_recordings_correlates_by_name() {
    let (server, adapter) = setup().await;
    mount_favourites(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/movielist"))
        .respond_with(xml(
            "<e2movielist>\
               <e2movie>\
                 <e2servicereference>1:0:0:0:0:0:0:0:0:0:/media/hdd/movie/tatort.ts</e2servicereference>\
                 <e2title>Tatort</e2title><e2description>Krimi</e2description>\
                 <e2servicename>Das Erste HD</e2servicename>\
                 <e2time>1700000000</e2time><e2length>12:34</e2length>\
                 <e2filename>/media/hdd/movie/tatort.ts</e2filename>\
               </e2movie>\
               <e2movie>\
                 <e2servicereference>1:0:0:0:0:0:0:0:0:0:/media/hdd/movie/radio show.ts</e2servicereference>\
                 <e2title>Show</e2title><e2description/>\
                 <e2servicename>Some Radio</e2servicename>\
                 <e2time>1700000000</e2time><e2length>?:??</e2length>\
                 <e2filename>/media/hdd/movie/radio show.ts</e2filename>\
               </e2movie>\
             </e2movielist>",
        ))
        .mount(&server)
        .await;

    adapter.list_channels(&cancel()).await.unwrap();
    let recordings = adapter.list_recordings(&cancel()).await.unwrap();

    assert_eq!(recordings.len(), 2);
    let tatort = &recordings[0];
    assert_eq!(tatort.channel_id.as_deref(), Some(ERSTE));
    assert_eq!(tatort.channel_type, ChannelType::Tv);
    assert!(tatort.picon.is_some());
    assert_eq!(tatort.end, at(1_700_000_754));
    assert_eq!(
        tatort.playback_url,
        format!("{}/file?file=%2Fmedia%2Fhdd%2Fmovie%2Ftatort.ts", server.uri())
    );

    let show = &recordings[1];
    assert_eq!(show.channel_id, None);
    assert_eq!(show.channel_type, ChannelType::Radio);
    assert_eq!(show.start, show.end);
}

#[tokio::test]
async fn test_delete_recording_rejected() {
    let (server, adapter) = setup().await;
    Mock::given(method("GET"))
        .and(path("/web/moviedelete"))
        .and(query_param("sRef", "1:0:0:0:0:0:0:0:0:0:/media/hdd/movie/x.ts"))
        .respond_with(simple_result("False", "Could not delete Movie"))
        .expect(1)
        .mount(&server)
        .await;

    let result = adapter
        .delete_recording("1:0:0:0:0:0:0:0:0:0:/media/hdd/movie/x.ts", &cancel())
        .await;

    match result {
        Err(CoreError::OperationFailed { status_text, .. }) => {
            assert_eq!(status_text, "Could not delete Movie");
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}

// ── Timers ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_and_cancel_timers() {
    let (server, adapter) = setup().await;
    let timer = |state: &str, begin: &str| {
        format!(
            "<e2timer><e2servicereference>{ERSTE}</e2servicereference><e2name>Tatort</e2name>\
             <e2description>Krimi</e2description><e2eit>4711</e2eit>\
             <e2timebegin>{begin}</e2timebegin><e2timeend>1700005400</e2timeend>\
             <e2state>{state}</e2state></e2timer>"
        )
    };
    Mock::given(method("GET"))
        .and(path("/web/timerlist"))
        .respond_with(xml(format!(
            "<e2timerlist>{}{}{}</e2timerlist>",
            timer("3", "1690000000"),
            timer("0", "1700000000"),
            timer("2", "1699999000"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/web/timerdelete"))
        .and(query_param("sRef", ERSTE))
        .and(query_param("begin", "1700000000"))
        .and(query_param("end", "1700005400"))
        .respond_with(simple_result("True", "The timer was deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let timers = adapter.list_timers(&cancel()).await.unwrap();
    assert_eq!(timers.len(), 2);
    assert_eq!(timers[0].status, TimerStatus::New);
    assert_eq!(timers[1].status, TimerStatus::InProgress);
    assert_eq!(
        timers[0].id.to_string(),
        format!("{ERSTE}~4711~1700000000~1700005400~1")
    );

    let id = timers[0].id.to_string().parse().unwrap();
    adapter.cancel_timer(&id, &cancel()).await.unwrap();
}

#[tokio::test]
async fn test_create_timer_uses_program_event_id() {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/timeraddbyeventid"))
        .and(query_param("sRef", ERSTE))
        .and(query_param("eventid", "102"))
        .and(query_param("dirname", "/media/hdd/movie/"))
        .respond_with(simple_result("True", "Timer added"))
        .expect(1)
        .mount(&server)
        .await;

    let config = DeviceConfig {
        recording_path: Some("/media/hdd/movie/".into()),
        ..config_for(&server)
    };
    let adapter = Adapter::new(config).unwrap();

    let request = NewTimer {
        channel_id: ERSTE.into(),
        program_id: format!("{ERSTE}~102~2~123456").parse().unwrap(),
    };
    adapter.create_timer(&request, &cancel()).await.unwrap();
}

#[tokio::test]
async fn test_create_timer_without_recording_path_omits_dirname() {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/timeraddbyeventid"))
        .and(query_param("eventid", "102"))
        .and(query_param_is_missing("dirname"))
        .respond_with(simple_result("True", "Timer added"))
        .expect(2)
        .mount(&server)
        .await;

    let request = NewTimer {
        channel_id: ERSTE.into(),
        program_id: format!("{ERSTE}~102~1~99").parse().unwrap(),
    };

    for recording_path in [None, Some(String::new())] {
        let config = DeviceConfig {
            recording_path,
            ..config_for(&server)
        };
        let adapter = Adapter::new(config).unwrap();
        adapter.create_timer(&request, &cancel()).await.unwrap();
    }
}

// ── Streams ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_channel_stream_zaps_first() {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .and(query_param("sRef", ERSTE))
        .respond_with(simple_result("True", "Active service is now ..."))
        .expect(2)
        .mount(&server)
        .await;

    let config = DeviceConfig {
        zap_before_stream: true,
        streaming_port: Some(8001),
        ..config_for(&server)
    };
    let host = config.host.clone();
    let adapter = Adapter::new(config).unwrap();

    let first = adapter.channel_stream(ERSTE, &cancel()).await.unwrap();
    let second = adapter.channel_stream(ERSTE, &cancel()).await.unwrap();

    assert_eq!(first.url, format!("http://{host}:8001/{ERSTE}"));
    assert!(!first.transcoded);
    assert_eq!(first.media_streams.len(), 2);
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_failed_zap_aborts_stream() {
    let server = MockServer::start().await;
    mount_bouquets(&server).await;
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .respond_with(simple_result("False", "No tuner available"))
        .mount(&server)
        .await;

    let config = DeviceConfig {
        zap_before_stream: true,
        ..config_for(&server)
    };
    let adapter = Adapter::new(config).unwrap();

    let result = adapter.channel_stream(ERSTE, &cancel()).await;
    assert!(
        matches!(result, Err(CoreError::OperationFailed { ref status_text, .. }) if status_text == "No tuner available"),
        "got {result:?}"
    );
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_lists_tuners() {
    let (server, adapter) = setup().await;
    Mock::given(method("GET"))
        .and(path("/web/deviceinfo"))
        .respond_with(xml(
            "<e2deviceinfo><e2frontends>\
               <e2frontend><e2name>Tuner A</e2name><e2model>DVB-S2</e2model></e2frontend>\
             </e2frontends></e2deviceinfo>",
        ))
        .mount(&server)
        .await;

    let status = adapter.status(&cancel()).await.unwrap();

    assert_eq!(status.version, "Unknown");
    assert!(!status.update_available);
    assert_eq!(status.tuners.len(), 1);
    assert_eq!(status.tuners[0].id, "DVB-S2");
    assert_eq!(status.tuners[0].name, "Tuner A");
}

#[tokio::test]
async fn test_unsupported_operations() {
    let (_server, adapter) = setup().await;

    assert!(matches!(
        adapter.list_series_timers(),
        Err(CoreError::Unsupported { .. })
    ));
    assert!(matches!(
        adapter.recording_stream("x"),
        Err(CoreError::Unsupported { .. })
    ));
    assert!(matches!(
        adapter.channel_image("x"),
        Err(CoreError::Unsupported { .. })
    ));
    assert!(matches!(
        adapter.reset_tuner("x"),
        Err(CoreError::Unsupported { .. })
    ));
    assert!(matches!(
        adapter.close_live_stream("1"),
        Err(CoreError::Unsupported { .. })
    ));
}
