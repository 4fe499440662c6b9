//! 输出目录工具。

use std::fs;
use std::io;
use std::path::Path;

/// 确保目录存在。幂等, 并行任务对同一路径同时调用也安全,
/// 目录已存在时直接成功。
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
