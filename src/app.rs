//! Presentation layer
//!
//! Single-window egui application: condition multi-select, mutually
//! exclusive capture/upload input modes, image preview, the extracted
//! text, and the numbered findings list. The most recent image and the
//! captured flag live here for the session so control interactions never
//! re-acquire the image; each analysis pass receives an immutable
//! `AnalysisInput` and never touches this state.

use eframe::egui;
use egui::{Color32, RichText};
use image::DynamicImage;
use tracing::{info, warn};

use crate::analysis::{run_pass, AnalysisInput, AnalysisReport};
use crate::config::AppConfig;
use crate::enrich::{DefinitionSource, WikipediaClient};
use crate::reference::{self, ReferenceData};
use crate::vision::{build_extractor, TextExtractor};

/// Mutually exclusive image acquisition modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Capture,
    Upload,
}

/// Accepted upload file extensions.
const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// The main application window.
pub struct InspectorApp {
    #[cfg(feature = "camera")]
    camera_index: u32,
    reference: ReferenceData,
    extractor: Box<dyn TextExtractor>,
    definitions: Box<dyn DefinitionSource>,

    /// Conditions the user ticked, in selection order.
    selected_conditions: Vec<String>,
    input_mode: InputMode,
    upload_path: String,

    /// Most recently acquired image; survives re-renders.
    session_image: Option<DynamicImage>,
    /// Whether an image has been acquired this session.
    captured: bool,
    preview: Option<egui::TextureHandle>,

    report: Option<AnalysisReport>,
    last_error: Option<String>,
}

impl InspectorApp {
    pub fn new(config: AppConfig, reference: ReferenceData) -> anyhow::Result<Self> {
        let extractor = build_extractor(&config.ocr)?;
        let definitions = Box::new(WikipediaClient::new(&config.lookup)?);
        Ok(Self {
            #[cfg(feature = "camera")]
            camera_index: config.capture.camera_index,
            reference,
            extractor,
            definitions,
            selected_conditions: Vec::new(),
            input_mode: InputMode::Capture,
            upload_path: String::new(),
            session_image: None,
            captured: false,
            preview: None,
            report: None,
            last_error: None,
        })
    }

    /// Store a freshly acquired image and refresh the preview texture.
    fn set_session_image(&mut self, ctx: &egui::Context, image: DynamicImage) {
        let rgba = image.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        self.preview = Some(ctx.load_texture("label-preview", color_image, Default::default()));
        self.session_image = Some(image);
        self.captured = true;
        self.report = None;
        self.last_error = None;
    }

    fn load_upload(&mut self, ctx: &egui::Context, path: &std::path::Path) {
        if !has_upload_extension(path) {
            self.last_error = Some(format!(
                "Unsupported file type: {} (accepted: jpg, jpeg, png, bmp)",
                path.display()
            ));
            return;
        }
        match image::open(path) {
            Ok(image) => {
                info!(path = %path.display(), "loaded uploaded image");
                self.set_session_image(ctx, image);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load image");
                self.last_error = Some(format!("Could not load {}: {e}", path.display()));
            }
        }
    }

    #[cfg(feature = "camera")]
    fn capture_from_camera(&mut self, ctx: &egui::Context) {
        let source = crate::capture::CameraSource::new(self.camera_index);
        match source.capture_still() {
            Ok(image) => self.set_session_image(ctx, image),
            Err(e) => self.last_error = Some(format!("Camera capture failed: {e}")),
        }
    }

    /// Run one analysis pass against the session image. Blocking: OCR and
    /// every definition lookup complete before the UI updates again.
    fn analyze(&mut self) {
        let Some(image) = self.session_image.clone() else {
            return;
        };
        let input = AnalysisInput {
            image,
            conditions: self.selected_conditions.clone(),
        };
        match run_pass(
            &input,
            &self.reference,
            self.extractor.as_ref(),
            self.definitions.as_ref(),
        ) {
            Ok(report) => {
                self.report = Some(report);
                self.last_error = None;
            }
            Err(e) => {
                self.report = None;
                self.last_error = Some(format!("Analysis failed: {e:#}"));
            }
        }
    }

    fn render_conditions(&mut self, ui: &mut egui::Ui) {
        ui.label("Select your health conditions:");
        ui.horizontal_wrapped(|ui| {
            for name in reference::condition_names() {
                let mut checked = self.selected_conditions.iter().any(|c| c == name);
                if ui.checkbox(&mut checked, name).changed() {
                    if checked {
                        self.selected_conditions.push(name.to_string());
                    } else {
                        self.selected_conditions.retain(|c| c != name);
                    }
                }
            }
        });
    }

    fn render_input_controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Choose input method:");
        ui.horizontal(|ui| {
            ui.radio_value(&mut self.input_mode, InputMode::Capture, "Capture from camera");
            ui.radio_value(&mut self.input_mode, InputMode::Upload, "Upload image");
        });

        match self.input_mode {
            InputMode::Capture => {
                #[cfg(feature = "camera")]
                {
                    if ui.button("Take a picture of the ingredients").clicked() {
                        let ctx = ui.ctx().clone();
                        self.capture_from_camera(&ctx);
                    }
                }
                #[cfg(not(feature = "camera"))]
                {
                    ui.label(
                        RichText::new(
                            "Built without camera support. Rebuild with the `camera` feature \
                             or switch to upload.",
                        )
                        .color(Color32::GRAY),
                    );
                }
            }
            InputMode::Upload => {
                ui.horizontal(|ui| {
                    ui.label("Image file:");
                    ui.text_edit_singleline(&mut self.upload_path);
                    if ui.button("Load").clicked() {
                        let path = std::path::PathBuf::from(self.upload_path.trim());
                        let ctx = ui.ctx().clone();
                        self.load_upload(&ctx, &path);
                    }
                });
                ui.label(
                    RichText::new("You can also drag an image file onto this window.")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        if let Some(texture) = &self.preview {
            ui.add(egui::Image::new(texture).max_width(420.0));
            let caption = match self.input_mode {
                InputMode::Capture => "Captured image",
                InputMode::Upload => "Uploaded image",
            };
            ui.label(RichText::new(caption).italics());
        }
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        if let Some(ref error) = self.last_error {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⚠").color(Color32::RED));
                ui.label(RichText::new(error).color(Color32::RED));
            });
            if ui.small_button("Dismiss").clicked() {
                self.last_error = None;
            }
            ui.add_space(4.0);
        }

        let Some(report) = &self.report else {
            return;
        };

        ui.heading("Extracted text");
        let mut extracted = report.extracted_text.as_str();
        ui.add(
            egui::TextEdit::multiline(&mut extracted)
                .desired_rows(8)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        if report.is_safe() {
            ui.label(
                RichText::new(
                    "No risky ingredients found in the extracted text for the selected \
                     conditions.",
                )
                .color(Color32::GREEN),
            );
            return;
        }

        ui.heading("Unsafe ingredients detected");
        for (idx, finding) in report.findings.iter().enumerate() {
            ui.horizontal_wrapped(|ui| {
                ui.label(format!("{}.", idx + 1));
                ui.label(RichText::new(finding.display_term()).strong());
                ui.label(format!(": {}", finding.reason));
            });
            ui.label(RichText::new(&finding.definition).weak());
            ui.add_space(6.0);
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Accept drag-and-drop uploads regardless of which widget has focus
        let dropped: Vec<_> = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.input_mode = InputMode::Upload;
            self.upload_path = path.display().to_string();
            self.load_upload(ctx, &path);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Ingredient Inspector");
            ui.label("Check product ingredients for safety and health risks.");
            ui.separator();

            self.render_conditions(ui);
            ui.add_space(8.0);
            self.render_input_controls(ui);
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_preview(ui);

                if self.captured && self.session_image.is_some() {
                    ui.add_space(8.0);
                    if ui.button("Analyze label").clicked() {
                        self.analyze();
                    }
                    ui.add_space(8.0);
                }

                self.render_results(ui);
            });
        });
    }
}

/// True when the path carries one of the accepted upload extensions.
fn has_upload_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            UPLOAD_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}
