//! 工具函数模块

/// 转义 SQL 标识符（反引号）
pub fn escape_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
