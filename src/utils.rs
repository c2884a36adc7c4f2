//! Upload filename helpers / 上传文件名工具函数

use unicode_normalization::UnicodeNormalization;

/// Get file extension (lowercase) / 获取文件扩展名
pub fn get_ext(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Check the extension against the allowed list / 检查扩展名是否允许
pub fn allowed_file(filename: &str, allowed_extensions: &[String]) -> bool {
    filename.contains('.') && allowed_extensions.iter().any(|e| e.eq_ignore_ascii_case(&get_ext(filename)))
}

/// Make an uploaded filename safe to store / 清理上传文件名
/// 1. NFKD-decompose and drop non-ASCII, so `é` becomes `e` / 转写为ASCII
/// 2. Path separators become spaces, so no directory part survives / 路径分隔符替换
/// 3. Whitespace runs become a single underscore / 空白替换为下划线
/// 4. Only ASCII letters, digits, `_`, `.` and `-` are kept / 仅保留安全字符
/// 5. Leading/trailing dots and underscores are stripped / 去除首尾点和下划线
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Document id = file name up to the first dot / 从文件名提取文档ID
pub fn doc_id_from_filename(filename: &str) -> String {
    filename.split('.').next().unwrap_or(filename).to_string()
}
