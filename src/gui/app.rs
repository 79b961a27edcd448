//! GCapricorn Main Application
//! Side control panel, chart views, and dataset loading on a background thread.

use crate::config::AppConfig;
use crate::data::{DataSource, DatasetCache, FileSource, ProteinDataset, RemoteSource, Selection};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Dataset loading result from background thread
enum LoadResult {
    Complete(Arc<ProteinDataset>),
    Error(String),
}

/// Main application window.
pub struct GCapricornApp {
    config: AppConfig,
    cache: Arc<DatasetCache>,
    /// Cache to return to if a newly opened file fails to load.
    previous_cache: Option<Arc<DatasetCache>>,
    dataset: Option<Arc<ProteinDataset>>,
    selection: Selection,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl GCapricornApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let source = RemoteSource::new(config.dataset_url.clone(), config.request_timeout());
        let mut app = Self::with_source(config, Box::new(source));
        app.start_loading();
        app
    }

    fn with_source(config: AppConfig, source: Box<dyn DataSource>) -> Self {
        let cache = Arc::new(DatasetCache::new(source, config.class_priority.clone()));
        Self {
            control_panel: ControlPanel::new(cache.source_description()),
            selection: Selection::new(config.default_class_selection.clone(), None),
            config,
            cache,
            previous_cache: None,
            dataset: None,
            chart_viewer: ChartViewer::new(),
            load_rx: None,
        }
    }

    fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    /// Fetch the dataset through the cache in a background thread.
    fn start_loading(&mut self) {
        if self.is_loading() {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.control_panel.busy = true;
        self.control_panel.set_progress(0.0, "Loading dataset...");

        let cache = Arc::clone(&self.cache);
        thread::spawn(move || {
            let result = match cache.get() {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => {
                    error!(error = %e, "dataset load failed");
                    LoadResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                if self.selection.cancer_type.is_none() {
                    self.selection = Selection::initial(&dataset, &self.config.default_class_selection);
                }
                self.selection.retain_known(&dataset);
                self.control_panel.set_progress(
                    1.0,
                    &format!(
                        "Loaded {} proteins, {} cancer types",
                        dataset.len(),
                        dataset.cancer_types().len()
                    ),
                );
                self.control_panel.finish_load(true);
                self.previous_cache = None;
                self.dataset = Some(dataset);
                self.chart_viewer.clear();
            }
            Ok(LoadResult::Error(message)) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", message));
                self.abandon_source_switch();
            }
            Err(TryRecvError::Empty) => {
                // Still loading
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                self.control_panel
                    .set_progress(0.0, "Error: loader thread stopped unexpectedly");
                self.abandon_source_switch();
            }
        }
    }

    /// Failed load: keep showing and reloading the source that last worked.
    fn abandon_source_switch(&mut self) {
        self.control_panel.finish_load(false);
        if let Some(cache) = self.previous_cache.take() {
            self.cache = cache;
        }
    }

    fn handle_reload(&mut self) {
        info!("reloading dataset");
        self.cache.invalidate();
        self.start_loading();
    }

    /// Switch to a local `.tsv`/`.tsv.zip` file picked by the user.
    fn handle_open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Protein Atlas table", &["tsv", "zip"])
            .pick_file()
        else {
            return;
        };

        info!(path = %path.display(), "switching to local dataset");
        let source = FileSource::new(path);
        let cache = Arc::new(DatasetCache::new(
            Box::new(source),
            self.config.class_priority.clone(),
        ));
        let previous = std::mem::replace(&mut self.cache, cache);
        if self.previous_cache.is_none() {
            self.previous_cache = Some(previous);
        }
        self.control_panel
            .begin_source_switch(self.cache.source_description());
        self.start_loading();
    }
}

impl eframe::App for GCapricornApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading() {
            ctx.request_repaint();
        }

        let dataset = self.dataset.clone();

        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action =
                        self.control_panel
                            .show(ui, dataset.as_deref(), &mut self.selection);

                    match action {
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::OpenFile => self.handle_open_file(),
                        ControlPanelAction::SelectionChanged => self.chart_viewer.clear(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, dataset.as_deref(), &self.selection);
        });
    }
}
