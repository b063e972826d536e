use crate::core::filter::{SongQuery, SortKey};
use crate::models::SavedSong;

/// 불러온 곡 목록과 현재 조회 조건, 그로부터 계산된 뷰, 선택 상태를 관리한다.
/// 뷰는 `songs`에 대한 인덱스 목록이며 조건이 바뀔 때마다 새로 계산된다.
#[derive(Debug, Default)]
pub struct Library {
    songs: Vec<SavedSong>,
    query: SongQuery,
    view: Vec<usize>,
    selected: Option<usize>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_songs(&mut self, songs: Vec<SavedSong>) {
        self.songs = songs;
        self.selected = None;
        self.refresh();
    }

    pub fn set_query(&mut self, query: SongQuery) {
        if self.query != query {
            self.query = query;
            self.refresh();
        }
    }

    pub fn set_search(&mut self, search: &str) {
        if self.query.search != search {
            self.query.search = search.to_string();
            self.refresh();
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if self.query.sort != sort {
            self.query.sort = sort;
            self.refresh();
        }
    }

    pub fn set_hide_explicit(&mut self, hide: bool) {
        if self.query.hide_explicit != hide {
            self.query.hide_explicit = hide;
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.view = self.query.apply(&self.songs);
        tracing::debug!(
            shown = self.view.len(),
            total = self.songs.len(),
            "view recomputed"
        );
    }

    pub fn songs(&self) -> &[SavedSong] {
        &self.songs
    }

    pub fn view(&self) -> &[usize] {
        &self.view
    }

    pub fn total_count(&self) -> usize {
        self.songs.len()
    }

    pub fn shown_count(&self) -> usize {
        self.view.len()
    }

    /// 화면 순서대로 (원본 인덱스, 곡) 쌍을 순회한다.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &SavedSong)> + '_ {
        self.view.iter().map(|&i| (i, &self.songs[i]))
    }

    /// 행에 대응하는 원본 곡을 선택한다. 인덱스가 범위를 벗어나면 선택하지 않는다.
    pub fn select(&mut self, song_index: usize) -> Option<&SavedSong> {
        let song = self.songs.get(song_index)?;
        self.selected = Some(song_index);
        Some(song)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&SavedSong> {
        self.selected.and_then(|i| self.songs.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::tests::{fixture, song};

    fn shown_names(library: &Library) -> Vec<&str> {
        library.rows().map(|(_, s)| s.track.name.as_str()).collect()
    }

    #[test]
    fn test_empty_library() {
        let library = Library::new();
        assert_eq!(library.total_count(), 0);
        assert_eq!(library.rows().count(), 0);
        assert!(library.selected().is_none());
    }

    #[test]
    fn test_set_songs_builds_view() {
        let mut library = Library::new();
        library.set_songs(fixture());
        assert_eq!(library.total_count(), 5);
        assert_eq!(library.shown_count(), 5);
        assert_eq!(shown_names(&library)[0], "HUMBLE.");
    }

    #[test]
    fn test_query_changes_recompute_view() {
        let mut library = Library::new();
        library.set_songs(fixture());

        library.set_search("iu");
        assert_eq!(shown_names(&library), vec!["Celebrity", "Blueming"]);

        library.set_sort(SortKey::Duration);
        assert_eq!(shown_names(&library), vec!["Blueming", "Celebrity"]);

        library.set_search("");
        library.set_hide_explicit(true);
        assert_eq!(library.shown_count(), 3);

        library.set_hide_explicit(false);
        assert_eq!(library.shown_count(), 5);
        // 원본 목록 순서는 바뀌지 않는다
        assert_eq!(library.songs()[0].track.name, "Blueming");
    }

    #[test]
    fn test_set_query_replaces_all_conditions() {
        let mut library = Library::new();
        library.set_songs(fixture());
        library.set_query(SongQuery {
            search: "kendrick".to_string(),
            sort: SortKey::Popularity,
            hide_explicit: false,
        });
        assert_eq!(shown_names(&library), vec!["HUMBLE.", "Money Trees"]);

        library.set_query(SongQuery::default());
        assert_eq!(library.shown_count(), 5);
    }

    #[test]
    fn test_select_resolves_displayed_row() {
        let mut library = Library::new();
        library.set_songs(fixture());
        let (index, name) = library
            .rows()
            .nth(2)
            .map(|(i, s)| (i, s.track.name.clone()))
            .unwrap();

        let selected = library.select(index).unwrap();
        assert_eq!(selected.track.name, name);
        assert_eq!(library.selected_index(), Some(index));
    }

    #[test]
    fn test_select_duplicate_names_resolves_exact_row() {
        let mut songs = fixture();
        songs.push(song("Blueming", "Cover Band", "Covers", "2020-01-01T00:00:00Z", 1_000, 1, false));
        let mut library = Library::new();
        library.set_songs(songs);

        let (index, _) = library
            .rows()
            .find(|(_, s)| s.track.artist_names() == "Cover Band")
            .unwrap();
        let selected = library.select(index).unwrap();
        assert_eq!(selected.track.album.name, "Covers");
    }

    #[test]
    fn test_select_out_of_range() {
        let mut library = Library::new();
        library.set_songs(fixture());
        assert!(library.select(99).is_none());
        assert!(library.selected().is_none());
    }

    #[test]
    fn test_set_songs_clears_selection() {
        let mut library = Library::new();
        library.set_songs(fixture());
        library.select(0);
        library.set_songs(fixture());
        assert!(library.selected().is_none());
    }
}
