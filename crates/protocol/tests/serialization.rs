use pretty_assertions::assert_eq;
use pwrwatch_protocol::*;
use serde_json::json;

fn sample_components() -> ComponentBreakdown {
    let mut components = ComponentBreakdown::new();
    components.insert(ComponentKind::Peripherals, ComponentPower::fixed(15.0));
    components.insert(ComponentKind::Cpu, ComponentPower::new(132.5, 50.0));
    components.insert(ComponentKind::Gpu, ComponentPower::new(75.0, 50.0));
    components.insert(ComponentKind::Ram, ComponentPower::new(7.0, 50.0));
    components.insert(ComponentKind::Disks, ComponentPower::new(2.5, 50.0));
    components.insert(ComponentKind::Motherboard, ComponentPower::fixed(30.0));
    components.insert(ComponentKind::Fans, ComponentPower::fixed(10.0));
    components.insert(ComponentKind::Display, ComponentPower::fixed(20.0));
    components
}

fn sample_snapshot() -> Snapshot {
    Snapshot {
        version: SNAPSHOT_VERSION,
        timestamp: 1704067200,
        tick: 3,
        total_power_watts: 292.0,
        total_source: TotalSource::Components,
        components: sample_components(),
        run_time_secs: 3.0,
        energy_wh: 0.25,
        history: vec![280.0, 288.0, 292.0],
        over_threshold: true,
        sensors: SensorSnapshot {
            temperatures: vec![SensorReading {
                label: "Package id 0".to_string(),
                value: 54.0,
            }],
            fans: vec![],
        },
    }
}

#[test]
fn snapshot_serializes_components_in_declaration_order() {
    let json = serde_json::to_string(&sample_snapshot()).unwrap();
    let keys = [
        "\"cpu\"",
        "\"gpu\"",
        "\"ram\"",
        "\"disks\"",
        "\"motherboard\"",
        "\"fans\"",
        "\"display\"",
        "\"peripherals\"",
    ];
    let positions: Vec<usize> = keys
        .iter()
        .map(|k| json.find(k).unwrap_or_else(|| panic!("missing key {}", k)))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn snapshot_json_shape() {
    let value = serde_json::to_value(sample_snapshot()).unwrap();

    assert_eq!(value["version"], json!(SNAPSHOT_VERSION));
    assert_eq!(value["total_source"], json!("components"));
    assert_eq!(value["total_power_watts"], json!(292.0));
    assert_eq!(
        value["components"]["cpu"],
        json!({"power_watts": 132.5, "usage_percent": 50.0})
    );
    assert_eq!(
        value["components"]["fans"],
        json!({"power_watts": 10.0, "usage_percent": 0.0})
    );
    assert_eq!(value["history"], json!([280.0, 288.0, 292.0]));
    assert_eq!(
        value["sensors"]["temperatures"][0],
        json!({"label": "Package id 0", "value": 54.0})
    );
}

#[test]
fn snapshot_survives_json_round_trip() {
    let snapshot = sample_snapshot();
    let json = serde_json::to_string_pretty(&snapshot).unwrap();
    let parsed: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn version_one_snapshot_fills_new_fields_with_defaults() {
    let v1 = json!({
        "version": 1,
        "timestamp": 1704067200,
        "tick": 1,
        "total_power_watts": 100.0,
        "components": {"cpu": {"power_watts": 100.0, "usage_percent": 10.0}},
        "run_time_secs": 1.0,
        "energy_wh": 0.02,
        "history": [100.0]
    });

    let parsed: Snapshot = serde_json::from_value(v1).unwrap();
    assert!(is_supported(parsed.version));
    assert_eq!(parsed.total_source, TotalSource::Components);
    assert!(!parsed.over_threshold);
    assert_eq!(parsed.sensors, SensorSnapshot::default());
    assert_eq!(
        parsed.component(ComponentKind::Cpu),
        Some(&ComponentPower::new(100.0, 10.0))
    );
}

#[test]
fn battery_total_keeps_component_breakdown() {
    let snapshot = Snapshot {
        total_power_watts: 30.0,
        total_source: TotalSource::Battery,
        ..sample_snapshot()
    };
    let value = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(value["total_source"], json!("battery"));
    assert_eq!(value["total_power_watts"], json!(30.0));
    assert_eq!(snapshot.components_total_watts(), 292.0);
}
