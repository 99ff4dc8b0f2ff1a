//! 占位符插值
//!
//! 占位符由 `start + 标识符 + end` 组成，标识符为一个或多个 ASCII 单词字符
//! (`[A-Za-z0-9_]`)。扫描从左到右只进行一遍，替换后的文本不会被再次扫描。

/// 替换模板中的占位符。`lookup` 返回 `None` 时占位符原样保留。
pub fn interpolate<F>(template: &str, start: &str, end: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(template.len());
    let mut pos = 0;

    while pos < template.len() {
        let rest = &template[pos..];

        if let Some((name, consumed)) = match_placeholder(rest, start, end) {
            match lookup(name) {
                Some(value) => output.push_str(&value),
                None => output.push_str(&rest[..consumed]),
            }
            pos += consumed;
            continue;
        }

        // 没有匹配，输出一个字符后继续
        let ch_len = rest.chars().next().map_or(1, char::len_utf8);
        output.push_str(&rest[..ch_len]);
        pos += ch_len;
    }

    output
}

/// 尝试在 `text` 开头匹配一个占位符，返回标识符和占位符的总字节长度
fn match_placeholder<'a>(text: &'a str, start: &str, end: &str) -> Option<(&'a str, usize)> {
    let after_start = text.strip_prefix(start)?;

    let word_len = after_start
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();

    // 标识符贪婪匹配，必要时回退，直到后面紧跟结束标记
    (1..=word_len).rev().find_map(|len| {
        after_start[len..]
            .starts_with(end)
            .then(|| (&after_start[..len], start.len() + len + end.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(name: &str) -> Option<String> {
        match name {
            "name" => Some("Ada".to_string()),
            "x" => Some("A".to_string()),
            "loop" => Some("${name}".to_string()),
            "a_b" => Some("AB".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_basic_replacement() {
        assert_eq!(interpolate("Hello, ${name}!", "${", "}", vars), "Hello, Ada!");
        assert_eq!(interpolate("${x} and ${x}", "${", "}", vars), "A and A");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        assert_eq!(interpolate("Hi ${who}", "${", "}", vars), "Hi ${who}");
    }

    #[test]
    fn test_malformed_placeholders() {
        assert_eq!(interpolate("Hello ${name", "${", "}", vars), "Hello ${name");
        assert_eq!(interpolate("Hello ${}", "${", "}", vars), "Hello ${}");
        assert_eq!(interpolate("Hello ${na me}", "${", "}", vars), "Hello ${na me}");
        assert_eq!(interpolate("$${name}", "${", "}", vars), "$Ada");
    }

    #[test]
    fn test_no_rescan_of_substituted_text() {
        assert_eq!(interpolate("${loop}", "${", "}", vars), "${name}");
    }

    #[test]
    fn test_custom_delimiters() {
        assert_eq!(interpolate("Hi {{name}}", "{{", "}}", vars), "Hi Ada");
        assert_eq!(interpolate("Hi ${name}", "{{", "}}", vars), "Hi ${name}");
    }

    #[test]
    fn test_identifier_backtracks_to_end_marker() {
        // 结束标记本身是单词字符时，标识符需要回退
        assert_eq!(interpolate("%a_b_ rest", "%", "_", vars), "AB rest");
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        assert_eq!(interpolate("你好，${name}！", "${", "}", vars), "你好，Ada！");
        assert_eq!(interpolate("${名字}", "${", "}", vars), "${名字}");
    }
}
