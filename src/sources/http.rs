use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::StatusCode;

use crate::config::SourceConfig;
use crate::models::{self, SavedSong};
use crate::sources::SongSource;

/// 고정된 URL의 JSON 문서에서 곡 목록을 가져오는 HTTP 클라이언트.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    songs_url: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("HTTP 클라이언트 생성에 실패했습니다")?;

        Ok(Self {
            client,
            songs_url: config.songs_url.clone(),
        })
    }

    pub fn songs_url(&self) -> &str {
        &self.songs_url
    }
}

impl SongSource for HttpSource {
    fn fetch_songs(&self) -> Result<Vec<SavedSong>> {
        tracing::info!(url = %self.songs_url(), "fetching song list");

        let resp = self
            .client
            .get(&self.songs_url)
            .send()
            .context("곡 목록을 불러오는 중 오류가 발생했습니다")?;

        let status = resp.status();
        if status != StatusCode::OK {
            bail!(
                "곡 목록을 불러오지 못했습니다. 상태 코드: {}",
                status.as_u16()
            );
        }

        let body = resp
            .text()
            .context("곡 목록 응답 읽기에 실패했습니다")?;
        let songs = models::parse_songs(&body).context("곡 목록 JSON 파싱에 실패했습니다")?;

        tracing::info!(count = songs.len(), "song list loaded");
        if let Some(first) = songs.first() {
            tracing::debug!(song = ?first, "first entry");
        }

        Ok(songs)
    }

    fn fetch_cover(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "fetching album cover");

        let resp = self
            .client
            .get(url)
            .send()
            .context("앨범 아트 다운로드에 실패했습니다")?;

        let status = resp.status();
        if status != StatusCode::OK {
            bail!("앨범 아트 요청이 실패했습니다. 상태 코드: {}", status.as_u16());
        }

        let data = resp
            .bytes()
            .context("앨범 아트 응답 읽기에 실패했습니다")?
            .to_vec();

        Ok(data)
    }
}
