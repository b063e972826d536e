use chrono::DateTime;

use crate::models::SavedSong;

/// 밀리초 단위 재생 시간을 `m:ss` 형식으로 바꾼다.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// RFC 3339 타임스탬프를 `YYYY-MM-DD` 형식의 날짜로 바꾼다.
/// 파싱할 수 없는 값은 그대로 반환한다.
pub fn format_added_at(added_at: &str) -> String {
    match DateTime::parse_from_rfc3339(added_at) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => added_at.to_string(),
    }
}

/// 상세 정보 화면과 `show` 명령이 공유하는 (라벨, 값) 목록.
pub fn detail_lines(song: &SavedSong) -> Vec<(&'static str, String)> {
    let track = &song.track;
    vec![
        ("제목", track.display_name().to_string()),
        ("아티스트", track.artist_names()),
        ("앨범", track.display_album().to_string()),
        ("재생 시간", format_duration(track.duration_ms)),
        ("인기도", track.popularity.to_string()),
        ("Explicit", if track.explicit { "예" } else { "아니오" }.to_string()),
        ("추가한 날짜", format_added_at(&song.added_at)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::tests::fixture;

    #[test]
    fn test_duration_zero() {
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn test_duration_pads_seconds() {
        assert_eq!(format_duration(215_000), "3:35");
        assert_eq!(format_duration(61_999), "1:01");
        assert_eq!(format_duration(3_600_000), "60:00");
    }

    #[test]
    fn test_added_at_date_only() {
        assert_eq!(format_added_at("2024-03-01T12:00:00Z"), "2024-03-01");
        assert_eq!(format_added_at("2024-03-01T23:59:59+09:00"), "2024-03-01");
    }

    #[test]
    fn test_added_at_unparsable() {
        assert_eq!(format_added_at(""), "");
        assert_eq!(format_added_at("yesterday"), "yesterday");
    }

    #[test]
    fn test_detail_lines() {
        let songs = fixture();
        let lines = detail_lines(&songs[1]);
        assert_eq!(lines[0], ("제목", "HUMBLE.".to_string()));
        assert_eq!(lines[3], ("재생 시간", "2:57".to_string()));
        assert_eq!(lines[5], ("Explicit", "예".to_string()));
        assert_eq!(lines[6], ("추가한 날짜", "2024-03-02".to_string()));
    }
}
