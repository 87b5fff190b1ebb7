mod common;

use common::{FakeHost, FakeScheduler, FakeViewport};
use displaylist_core::{
    load_engine, EnvironmentProbe, HarnessConfig, HarnessError, Session,
};
use futures::executor::block_on;

#[test]
fn mt_without_shared_memory_rejects_before_any_work() {
    let mut host = FakeHost::isolated();
    host.probe = EnvironmentProbe {
        cross_origin_isolated: true,
        shared_array_buffer: false,
    };
    let config = HarnessConfig::default().for_engine("displaylist", "mt");

    let err = block_on(load_engine(&mut host, &config)).err().unwrap();
    assert!(matches!(err, HarnessError::SharedMemoryUnavailable));
    assert!(err.is_environment());
    assert!(host.calls.is_empty());
}

#[test]
fn mt_without_isolation_rejects() {
    let mut host = FakeHost::isolated();
    host.probe.cross_origin_isolated = false;
    let err = block_on(load_engine(&mut host, &HarnessConfig::default()))
        .err()
        .unwrap();
    assert!(matches!(err, HarnessError::CrossOriginIsolationRequired));
    assert!(host.calls.is_empty());
}

#[test]
fn st_loads_without_isolation() {
    let mut host = FakeHost::isolated();
    host.probe = EnvironmentProbe {
        cross_origin_isolated: false,
        shared_array_buffer: false,
    };
    let config = HarnessConfig::default().for_engine("build/displaylist-st", "st");
    let loaded = block_on(load_engine(&mut host, &config)).unwrap();
    assert_eq!(loaded.module.script_url(), "build/displaylist-st.js");
    assert_eq!(loaded.module.main_script_url(), None);
}

#[test]
fn load_runs_steps_in_order() {
    let mut host = FakeHost::isolated();
    block_on(load_engine(&mut host, &HarnessConfig::default())).unwrap();
    assert_eq!(
        host.calls,
        vec![
            "instantiate displaylist.js",
            "view TGFXThreadsView.MakeFrom(#displaylist)",
            "image bridge=/static/resources/assets/bridge.jpg",
            "image TGFX=/static/resources/assets/tgfx.png",
            "fetch /static/resources/font/NotoSansSC-Regular.otf",
            "fetch /static/resources/font/NotoColorEmoji.ttf",
            "fonts 3+2",
        ]
    );
}

#[test]
fn font_fetch_failure_aborts_before_registration() {
    let mut host = FakeHost::isolated();
    host.assets.remove("/static/resources/font/NotoColorEmoji.ttf");

    let err = block_on(load_engine(&mut host, &HarnessConfig::default()))
        .err()
        .unwrap();
    match err {
        HarnessError::AssetFetch { path, .. } => {
            assert_eq!(path, "/static/resources/font/NotoColorEmoji.ttf")
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(!host.calls.iter().any(|c| c.starts_with("fonts")));
}

#[test]
fn instantiation_failure_propagates() {
    let mut host = FakeHost::isolated();
    host.fail_instantiate = true;
    let err = block_on(load_engine(&mut host, &HarnessConfig::default()))
        .err()
        .unwrap();
    assert!(matches!(err, HarnessError::EngineInit(_)));
    assert_eq!(host.calls.len(), 1);
}

#[test]
fn loaded_view_attaches_and_draws() {
    let mut host = FakeHost::isolated();
    let config = HarnessConfig::default();
    let loaded = block_on(load_engine(&mut host, &config)).unwrap();

    let mut session = Session::new(&config);
    let mut scheduler = FakeScheduler::default();
    let mut viewport = FakeViewport::new(640.0, 480.0, 1.0);
    session
        .attach(loaded.view, &mut scheduler, &mut viewport)
        .unwrap();
    session.on_frame(&mut scheduler);

    assert_eq!(session.engine().unwrap().draws.len(), 1);
    assert_eq!(session.engine().unwrap().sizes, vec![1.0]);
    assert!(session.is_running());
}
