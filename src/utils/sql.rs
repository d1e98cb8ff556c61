use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符，避免用户输入的 `%`、`_` 被当作通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 子串匹配的 LIKE 表达式（显式声明转义字符，SQLite 默认没有）
pub fn contains_pattern(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input))).escape('\\')
}
