use cptu_sbt::app::SbtApp;
use cptu_sbt::config::ChartConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ChartConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CPTu SBT – Soil Behavior Type Chart",
        options,
        Box::new(|_cc| Ok(Box::new(SbtApp::new(config)))),
    )
}
