#[cfg(feature = "gui")]
mod app;

#[cfg(feature = "gui")]
pub fn launch(config: crate::config::Config) {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 700.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "저장한 곡 목록",
        options,
        Box::new(move |cc| Ok(Box::new(app::SongViewApp::new(cc, &config)))),
    ) {
        tracing::error!(error = %e, "GUI exited with error");
    }
}
