use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use egui::{Align2, Color32, ColorImage, FontId, Sense, TextureHandle, TextureOptions};
use egui_extras::{Column, TableBuilder};
use image::imageops::FilterType;

use crate::config::Config;
use crate::core::filter::SortKey;
use crate::core::format::{detail_lines, format_duration};
use crate::core::library::Library;
use crate::models::SavedSong;
use crate::sources::http::HttpSource;
use crate::sources::SongSource;

const COVER_SIZE: u32 = 250;

type SharedSource = Arc<dyn SongSource + Send + Sync>;

enum BgResult {
    SongsLoaded(Vec<SavedSong>),
    SongsFailed(String),
    CoverLoaded(u64, ColorImage),
}

pub struct SongViewApp {
    // Songs
    library: Library,
    source: Option<SharedSource>,

    // Query widgets
    search_text: String,
    sort: SortKey,
    hide_explicit: bool,

    // Album cover
    cover_texture: Option<TextureHandle>,
    cover_seq: u64,

    // Background tasks
    ctx: egui::Context,
    tx: mpsc::Sender<BgResult>,
    rx: mpsc::Receiver<BgResult>,
    is_loading: bool,
    error_dialog: Option<String>,
}

impl SongViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        Self::setup_cjk_fonts(&cc.egui_ctx);

        match HttpSource::new(&config.source) {
            Ok(source) => {
                let source: SharedSource = Arc::new(source);
                Self::with_source(&cc.egui_ctx, Some(source))
            }
            Err(e) => {
                let mut app = Self::with_source(&cc.egui_ctx, None);
                app.error_dialog = Some(format!("{:#}", e));
                app
            }
        }
    }

    fn with_source(ctx: &egui::Context, source: Option<SharedSource>) -> Self {
        let (tx, rx) = mpsc::channel();

        let mut app = Self {
            library: Library::new(),
            source,
            search_text: String::new(),
            sort: SortKey::default(),
            hide_explicit: false,
            cover_texture: None,
            cover_seq: 0,
            ctx: ctx.clone(),
            tx,
            rx,
            is_loading: false,
            error_dialog: None,
        };

        app.start_load();
        app
    }

    fn setup_cjk_fonts(ctx: &egui::Context) {
        let mut fonts = egui::FontDefinitions::default();

        // 트랙 이름에 한글, 일본어, 중국어가 섞여 있으므로 CJK 폰트를 뒤에 추가한다
        let font_paths = [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
            // Linux
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            // Windows
            "C:\\Windows\\Fonts\\malgun.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path) {
                fonts
                    .font_data
                    .insert("cjk_font".to_string(), egui::FontData::from_owned(font_data));

                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    if let Some(list) = fonts.families.get_mut(&family) {
                        list.push("cjk_font".to_string());
                    }
                }

                ctx.set_fonts(fonts);
                tracing::debug!(path, "CJK font loaded");
                return;
            }
        }

        tracing::warn!("no CJK font found, non-Latin titles may not render");
    }

    fn start_load(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        self.is_loading = true;

        std::thread::spawn(move || {
            match source.fetch_songs() {
                Ok(songs) => {
                    let _ = tx.send(BgResult::SongsLoaded(songs));
                }
                Err(e) => {
                    tracing::error!(error = %e, "song list fetch failed");
                    let _ = tx.send(BgResult::SongsFailed(format!("{:#}", e)));
                }
            }
            ctx.request_repaint();
        });
    }

    fn start_cover_fetch(&self, seq: u64, url: String) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        std::thread::spawn(move || {
            let result = source
                .fetch_cover(&url)
                .and_then(|data| decode_cover(&data));

            match result {
                Ok(image) => {
                    let _ = tx.send(BgResult::CoverLoaded(seq, image));
                    ctx.request_repaint();
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "album cover fetch failed");
                }
            }
        });
    }

    fn select_song(&mut self, song_index: usize) {
        let Some(song) = self.library.select(song_index) else {
            return;
        };
        let cover_url = song.track.cover_url().map(str::to_string);

        self.cover_seq += 1;
        match cover_url {
            Some(url) => self.start_cover_fetch(self.cover_seq, url),
            None => self.cover_texture = None,
        }
    }

    fn process_bg_results(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            match result {
                BgResult::SongsLoaded(songs) => {
                    self.library.set_songs(songs);
                    self.cover_texture = None;
                    self.is_loading = false;
                }
                BgResult::SongsFailed(msg) => {
                    self.is_loading = false;
                    self.error_dialog = Some(msg);
                }
                BgResult::CoverLoaded(seq, image) => {
                    // 더 최근에 선택한 곡의 요청이 있으면 늦게 도착한 이미지는 버린다
                    if seq != self.cover_seq {
                        tracing::debug!(seq, current = self.cover_seq, "stale cover dropped");
                        continue;
                    }
                    self.cover_texture =
                        Some(self.ctx.load_texture("album_cover", image, TextureOptions::LINEAR));
                }
            }
        }
    }

    fn apply_query_widgets(&mut self) {
        self.library.set_search(&self.search_text);
        self.library.set_sort(self.sort);
        self.library.set_hide_explicit(self.hide_explicit);
    }

    fn show_song_table(&mut self, ui: &mut egui::Ui) {
        let selected = self.library.selected_index();
        let mut clicked = None;

        {
            let rows: Vec<(usize, &SavedSong)> = self.library.rows().collect();

            TableBuilder::new(ui)
                .striped(true)
                .sense(Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::initial(300.0).at_least(80.0).clip(true).resizable(true))
                .column(Column::initial(200.0).at_least(80.0).clip(true).resizable(true))
                .column(Column::exact(90.0))
                .column(Column::remainder().at_least(80.0).clip(true))
                .header(24.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("제목");
                    });
                    header.col(|ui| {
                        ui.strong("아티스트");
                    });
                    header.col(|ui| {
                        ui.strong("재생 시간");
                    });
                    header.col(|ui| {
                        ui.strong("앨범");
                    });
                })
                .body(|body| {
                    body.rows(22.0, rows.len(), |mut row| {
                        let (song_index, song) = rows[row.index()];
                        let track = &song.track;
                        row.set_selected(selected == Some(song_index));

                        row.col(|ui| {
                            ui.label(&track.name);
                        });
                        row.col(|ui| {
                            ui.label(track.artist_names());
                        });
                        row.col(|ui| {
                            ui.vertical_centered(|ui| {
                                ui.label(format_duration(track.duration_ms));
                            });
                        });
                        row.col(|ui| {
                            ui.label(&track.album.name);
                        });

                        if row.response().clicked() {
                            clicked = Some(song_index);
                        }
                    });
                });
        }

        if let Some(song_index) = clicked {
            self.select_song(song_index);
        }
    }

    fn show_detail(&self, ui: &mut egui::Ui) {
        let size = egui::vec2(COVER_SIZE as f32, COVER_SIZE as f32);

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if let Some(ref texture) = self.cover_texture {
                ui.image(egui::load::SizedTexture::new(texture.id(), size));
            } else {
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                ui.painter().rect_filled(rect, 0.0, Color32::BLACK);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "앨범 아트",
                    FontId::proportional(14.0),
                    Color32::WHITE,
                );
            }
        });
        ui.add_space(10.0);

        let Some(song) = self.library.selected() else {
            return;
        };

        egui::Grid::new("detail_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                for (label, value) in detail_lines(song) {
                    ui.label(format!("{}:", label));
                    ui.add(egui::Label::new(value).wrap());
                    ui.end_row();
                }
            });
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.error_dialog.clone() else {
            return;
        };

        egui::Window::new("오류")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(msg);
                ui.add_space(8.0);
                if ui.button("확인").clicked() {
                    self.error_dialog = None;
                }
            });
    }
}

impl eframe::App for SongViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_bg_results();
        let modal = self.error_dialog.is_some();

        // Top panel: search, sort, explicit filter
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            if modal {
                ui.disable();
            }
            ui.horizontal(|ui| {
                ui.label("검색:");
                ui.add(egui::TextEdit::singleline(&mut self.search_text).desired_width(240.0));
                ui.add_space(20.0);

                ui.label("정렬:");
                egui::ComboBox::from_id_salt("sort_key")
                    .selected_text(self.sort.label())
                    .show_ui(ui, |ui| {
                        for key in SortKey::ALL {
                            ui.selectable_value(&mut self.sort, key, key.label());
                        }
                    });
                ui.add_space(20.0);

                ui.checkbox(&mut self.hide_explicit, "explicit 곡 숨기기");

                if self.is_loading {
                    ui.spinner();
                    ui.label("불러오는 중...");
                } else {
                    ui.label(format!(
                        "{} / {}곡",
                        self.library.shown_count(),
                        self.library.total_count()
                    ));
                }
            });
        });

        self.apply_query_widgets();

        // Right panel: album cover + details
        egui::SidePanel::right("detail_panel")
            .exact_width(300.0)
            .show(ctx, |ui| {
                self.show_detail(ui);
            });

        // Central panel: song table
        egui::CentralPanel::default().show(ctx, |ui| {
            if modal {
                ui.disable();
            }
            self.show_song_table(ui);
        });

        self.show_error_dialog(ctx);
    }
}

/// 이미지 바이트를 디코딩하여 표지 크기로 리샘플링한다.
fn decode_cover(data: &[u8]) -> Result<ColorImage> {
    let img = image::load_from_memory(data).context("앨범 아트 이미지를 해석할 수 없습니다")?;
    let rgba = img
        .resize_exact(COVER_SIZE, COVER_SIZE, FilterType::Lanczos3)
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
