use color_eyre::eyre::Result;

use crate::config::Settings;
use crate::data::SystemMonitor;
use crate::ui::format_bytes;

pub fn run(settings: &Settings) -> Result<()> {
    let mut monitor = SystemMonitor::detect(settings)?;
    let (gpu_load, cpu_watts, gpu_watts) = monitor.source_mut().probe_names();
    let profile = monitor.profile();

    println!("=== Processor ===");
    println!("Name:      {}", profile.cpu.name);
    println!(
        "Cores:     {} physical / {} logical",
        profile.cpu.cores, profile.cpu.threads
    );
    println!(
        "TDP class: {:.0} W base, {:.0} W max",
        profile.cpu.tdp.base_watts, profile.cpu.tdp.max_watts
    );
    println!();

    println!("=== Graphics ===");
    println!("Name:      {}", profile.gpu.name);
    println!(
        "Type:      {}",
        if profile.gpu.integrated {
            "integrated"
        } else {
            "discrete"
        }
    );
    println!("TDP:       {:.0} W", profile.gpu.tdp_watts);
    println!();

    println!("=== Memory & Storage ===");
    println!("RAM:       {:.1} GB", profile.ram_total_gb);
    if profile.disks.is_empty() {
        println!("Disks:     none reported");
    }
    for disk in &profile.disks {
        println!(
            "{:10} {} on {} ({})",
            format!("{}:", disk.kind),
            disk.device,
            disk.mount_point.display(),
            format_bytes(disk.total_bytes)
        );
    }
    println!("Battery:   {}", profile.battery_summary());
    println!(
        "Overhead:  {:.0} W fixed (motherboard, fans, display, peripherals)",
        profile.overhead.total()
    );
    println!();

    println!("=== Telemetry Sources ===");
    print_chain("GPU load", &gpu_load);
    print_chain("CPU watts", &cpu_watts);
    print_chain("GPU watts", &gpu_watts);

    Ok(())
}

fn print_chain(label: &str, names: &[&str]) {
    if names.is_empty() {
        println!("{:10} none (estimated from utilization)", format!("{}:", label));
    } else {
        println!("{:10} {}", format!("{}:", label), names.join(" -> "));
    }
}
