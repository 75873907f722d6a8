/*!
 * Unit tests for file and filename utilities
 */

use autocap::file_utils::{
    get_file_extension, is_video_extension, remove_file_extension, FileManager,
};

use crate::common::create_temp_dir;

#[test]
fn test_getFileExtension_shouldLowercaseAndTakeLastComponent() {
    assert_eq!(get_file_extension("Movie.MP4"), "mp4");
    assert_eq!(get_file_extension("archive.tar.gz"), "gz");
    assert_eq!(get_file_extension("clip.webm"), "webm");
}

#[test]
fn test_getFileExtension_withoutExtension_shouldReturnEmpty() {
    assert_eq!(get_file_extension("Makefile"), "");
}

#[test]
fn test_removeFileExtension_shouldOnlyStripLast() {
    assert_eq!(remove_file_extension("clip.mp4"), "clip");
    assert_eq!(remove_file_extension("my.holiday.video.mov"), "my.holiday.video");
    assert_eq!(remove_file_extension("noext"), "noext");
}

#[test]
fn test_isVideoExtension_shouldRecognizeCommonContainers() {
    assert!(is_video_extension("mp4"));
    assert!(is_video_extension("MKV"));
    assert!(is_video_extension("webm"));
    assert!(!is_video_extension("mp3"));
    assert!(!is_video_extension("txt"));
    assert!(!is_video_extension(""));
}

#[test]
fn test_fileManager_writeAndRead_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested/dir/file.txt");

    FileManager::write_to_file(&path, "caption content").unwrap();

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path).unwrap(), "caption content");
}

#[test]
fn test_fileManager_writeBytes_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("blob.bin");

    FileManager::write_bytes(&path, &[0u8, 1, 2, 255]).unwrap();

    assert_eq!(FileManager::read_bytes(&path).unwrap(), vec![0u8, 1, 2, 255]);
}
