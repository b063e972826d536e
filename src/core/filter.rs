use std::cmp::Reverse;

use clap::ValueEnum;

use crate::models::SavedSong;

/// 정렬 기준. 모든 기준은 내림차순이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// 추가된 시각 (최신 순)
    #[default]
    AddedAt,
    /// 재생 시간 (긴 순)
    Duration,
    /// 인기도 (높은 순)
    Popularity,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::AddedAt, SortKey::Duration, SortKey::Popularity];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::AddedAt => "추가한 날짜",
            SortKey::Duration => "재생 시간",
            SortKey::Popularity => "인기도",
        }
    }
}

/// 검색어, 정렬 기준, explicit 숨김 여부를 묶은 조회 조건.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongQuery {
    pub search: String,
    pub sort: SortKey,
    pub hide_explicit: bool,
}

impl SongQuery {
    /// 곡이 조건을 만족하는지 검사한다.
    /// 검색어는 앞뒤 공백을 제거하고 대소문자를 무시하여 제목, 아티스트, 앨범 중
    /// 하나라도 부분 문자열로 포함하면 일치로 본다.
    pub fn matches(&self, song: &SavedSong) -> bool {
        if self.hide_explicit && song.track.explicit {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        song.track
            .search_haystacks()
            .iter()
            .any(|hay| hay.contains(&needle))
    }

    /// 조건에 맞는 곡의 인덱스를 정렬 기준에 따라 반환한다.
    /// 원본 목록은 건드리지 않으며, 같은 값끼리는 원래 순서를 유지한다.
    pub fn apply(&self, songs: &[SavedSong]) -> Vec<usize> {
        let mut view: Vec<usize> = songs
            .iter()
            .enumerate()
            .filter(|(_, song)| self.matches(song))
            .map(|(i, _)| i)
            .collect();

        match self.sort {
            SortKey::AddedAt => view.sort_by_key(|&i| Reverse(songs[i].added_at.as_str())),
            SortKey::Duration => view.sort_by_key(|&i| Reverse(songs[i].track.duration_ms)),
            SortKey::Popularity => view.sort_by_key(|&i| Reverse(songs[i].track.popularity)),
        }

        view
    }
}

/// 뷰 순서대로 트랙 이름이 정확히 일치하는 첫 번째 곡을 찾는다.
pub fn find_by_name(songs: &[SavedSong], view: &[usize], name: &str) -> Option<usize> {
    view.iter()
        .copied()
        .find(|&i| songs.get(i).is_some_and(|s| s.track.name == name))
}
