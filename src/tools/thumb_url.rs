/// 網站上的縮圖路徑對應
///
/// 分類圖片 `/assets/categories/{cat}/file.JPG` 對應 `/assets/categories/{cat}/thumbs/file.webp`，
/// 其他圖片對應 `/assets/thumbs/file.webp`
///
/// 供網站前端建置流程使用的公開 API，產生器本身不呼叫
#[must_use]
pub fn thumbnail_url_for(src: &str) -> String {
    let file_name = src.rsplit('/').next().unwrap_or_default();
    let name = strip_extension(file_name);

    if src.contains("/categories/") {
        let dir = src.rfind('/').map_or("", |idx| &src[..idx]);
        return format!("{dir}/thumbs/{name}.webp");
    }

    format!("/assets/thumbs/{name}.webp")
}

/// 移除最後一段由文字字元組成的副檔名
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx)
            if idx + 1 < file_name.len()
                && file_name[idx + 1..]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            &file_name[..idx]
        }
        _ => file_name,
    }
}
