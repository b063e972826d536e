pub mod http;

use anyhow::Result;

use crate::models::SavedSong;

/// 곡 목록과 앨범 아트를 가져오는 소스 트레이트.
pub trait SongSource {
    /// 저장된 곡 목록 전체를 가져온다.
    fn fetch_songs(&self) -> Result<Vec<SavedSong>>;
    /// 앨범 아트 이미지 원본 바이트를 다운로드한다.
    fn fetch_cover(&self, url: &str) -> Result<Vec<u8>>;
}
