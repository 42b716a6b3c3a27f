use sand_battery_engine::{DisplayList, SimulationConfig, SimulationCore};

#[test]
fn perf_smoke_frame() {
    let config = SimulationConfig { rng_seed: Some(1), ..SimulationConfig::default() };
    let mut core = SimulationCore::new(config, Default::default()).unwrap();
    core.enable_perf_metrics(true);
    core.start_discharging();

    let mut surface = DisplayList::new();
    let mut now = 0.0;
    for _ in 0..120 {
        core.frame_on(now, &mut surface, 1920.0, 1080.0);
        surface.clear();
        now += 16.0;
    }

    let stats = core.get_perf_stats();
    assert_eq!(stats.frames(), 120);
    assert!(stats.frame_ms() >= 0.0);
    assert!(stats.render_ms() >= 0.0);
    assert_eq!(stats.active_particles(), 150);
}
