use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, CellAlignment, Table};
use dialoguer::Input;

use crate::config::{self, Config, SourceConfig};
use crate::core::filter::{self, SongQuery, SortKey};
use crate::core::format::{detail_lines, format_duration};
use crate::core::library::Library;
use crate::models::SavedSong;
use crate::sources::http::HttpSource;
use crate::sources::SongSource;

#[derive(Parser)]
#[command(name = "songview", about = "저장한 곡 목록 뷰어")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 곡 목록 JSON URL (설정 파일 값을 덮어씀)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 곡 목록을 표로 출력
    List {
        /// 제목, 아티스트, 앨범 검색어
        #[arg(long, short)]
        search: Option<String>,
        /// 정렬 기준 (내림차순)
        #[arg(long, value_enum, default_value_t = SortKey::AddedAt)]
        sort: SortKey,
        /// explicit 곡 숨기기
        #[arg(long)]
        hide_explicit: bool,
    },
    /// 곡 하나의 상세 정보 출력
    Show {
        /// 트랙 이름 (정확히 일치)
        name: String,
    },
    /// 곡 목록 URL과 타임아웃 설정
    Config,
}

pub fn run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_config();
    if let Some(url) = cli.url {
        cfg.source.songs_url = url;
    }

    match cli.command {
        Some(Commands::List {
            search,
            sort,
            hide_explicit,
        }) => cmd_list(
            &cfg,
            SongQuery {
                search: search.unwrap_or_default(),
                sort,
                hide_explicit,
            },
        ),
        Some(Commands::Show { name }) => cmd_show(&cfg, &name),
        Some(Commands::Config) => cmd_config(cfg),
        None => {
            #[cfg(feature = "gui")]
            {
                crate::gui::launch(cfg);
                Ok(())
            }
            #[cfg(not(feature = "gui"))]
            {
                anyhow::bail!(
                    "GUI 기능이 활성화되지 않았습니다. 다시 빌드하세요: cargo build --features gui"
                );
            }
        }
    }
}

fn load_library(cfg: &Config) -> Result<Library> {
    let source = HttpSource::new(&cfg.source)?;
    let songs = source.fetch_songs()?;
    let mut library = Library::new();
    library.set_songs(songs);
    Ok(library)
}

fn cmd_list(cfg: &Config, query: SongQuery) -> Result<()> {
    let mut library = load_library(cfg)?;
    library.set_query(query);

    if library.shown_count() == 0 {
        println!("조건에 맞는 곡이 없습니다 (전체 {}곡)", library.total_count());
        return Ok(());
    }

    let table = song_table(library.rows().map(|(_, song)| song));
    println!("{table}");
    println!(
        "\n{}곡 표시 중 (전체 {}곡)",
        library.shown_count(),
        library.total_count()
    );

    Ok(())
}

fn song_table<'a>(songs: impl Iterator<Item = &'a SavedSong>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["제목", "아티스트", "재생 시간", "앨범", "Explicit"]);

    for song in songs {
        let track = &song.track;
        table.add_row(vec![
            Cell::new(&track.name),
            Cell::new(track.artist_names()),
            Cell::new(format_duration(track.duration_ms)).set_alignment(CellAlignment::Center),
            Cell::new(&track.album.name),
            Cell::new(if track.explicit { "E" } else { "" }),
        ]);
    }

    table
}

fn cmd_show(cfg: &Config, name: &str) -> Result<()> {
    let library = load_library(cfg)?;

    let index = filter::find_by_name(library.songs(), library.view(), name)
        .with_context(|| format!("'{}' 곡을 찾을 수 없습니다", name))?;
    let song = &library.songs()[index];

    for (label, value) in detail_lines(song) {
        println!("{label}: {value}");
    }
    if let Some(url) = song.track.cover_url() {
        println!("앨범 아트: {url}");
    }

    Ok(())
}

fn cmd_config(mut cfg: Config) -> Result<()> {
    println!("곡 목록 소스 설정\n");

    let songs_url: String = Input::new()
        .with_prompt("곡 목록 URL")
        .with_initial_text(cfg.source.songs_url.clone())
        .interact_text()?;

    let timeout_secs: u64 = Input::new()
        .with_prompt("요청 타임아웃(초)")
        .default(cfg.source.timeout_secs)
        .interact_text()?;

    cfg.source = SourceConfig {
        songs_url,
        timeout_secs,
    };

    config::save_config(&cfg)?;
    println!("\n설정이 저장되었습니다!");
    Ok(())
}
