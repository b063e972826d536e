use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedSong {
    pub added_at: String,
    pub track: Track,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
    pub duration_ms: u64,
    pub popularity: u32,
    pub explicit: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Album {
    pub name: String,
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlbumImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Track {
    pub fn display_name(&self) -> &str {
        non_blank(&self.name).unwrap_or("알 수 없음")
    }

    pub fn display_album(&self) -> &str {
        non_blank(&self.album.name).unwrap_or("알 수 없음")
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 검색 대상 문자열(제목, 아티스트, 앨범)을 소문자로 반환한다.
    /// 아티스트 이름은 공백 하나로 이어 붙인다.
    pub fn search_haystacks(&self) -> [String; 3] {
        let artists = self
            .artists
            .iter()
            .map(|a| a.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        [
            self.name.to_lowercase(),
            artists,
            self.album.name.to_lowercase(),
        ]
    }

    /// 상세 화면에 표시할 앨범 아트 URL.
    /// 이미지가 두 개 이상이면 두 번째(중간 크기)를, 하나뿐이면 그것을 쓴다.
    pub fn cover_url(&self) -> Option<&str> {
        let images = &self.album.images;
        images
            .get(1)
            .or_else(|| images.first())
            .map(|img| img.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// JSON 배열 문서를 SavedSong 목록으로 파싱한다.
pub fn parse_songs(json: &str) -> serde_json::Result<Vec<SavedSong>> {
    serde_json::from_str(json)
}
