//! 单行 CSV 解析
//!
//! 按行解析，不支持引号内换行（调用方先按行切分）。格式错误时不会报错，
//! 最坏情况下只是字段切分不正确。

/// 解析一行 CSV，返回去掉首尾空白的字段列表
///
/// ```
/// use couponhub::utils::csv_line::parse_line;
/// assert_eq!(parse_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
/// assert_eq!(parse_line(r#""say ""hi""""#), vec![r#"say "hi""#]);
/// ```
pub fn parse_line(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    let mut fields = Vec::new();
    let mut i = 0;

    loop {
        // 引号前的空白不影响字段是否被引号包裹
        let mut start = i;
        while start < len && (chars[start] == ' ' || chars[start] == '\t') {
            start += 1;
        }

        if start < len && chars[start] == '"' {
            let mut field = String::new();
            i = start + 1;
            while i < len {
                if chars[i] == '"' {
                    if i + 1 < len && chars[i + 1] == '"' {
                        field.push('"');
                        i += 2;
                        continue;
                    }
                    i += 1;
                    break;
                }
                field.push(chars[i]);
                i += 1;
            }
            // 闭合引号和逗号之间的多余字符原样保留
            while i < len && chars[i] != ',' {
                field.push(chars[i]);
                i += 1;
            }
            fields.push(field.trim().to_string());
        } else {
            while i < len && chars[i] != ',' {
                i += 1;
            }
            let raw: String = chars[start.min(i)..i].iter().collect();
            fields.push(unquote(&raw));
        }

        if i < len && chars[i] == ',' {
            i += 1;
            continue;
        }
        return fields;
    }
}

/// 去掉一个首尾引号并还原转义的双引号
fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.replace("\"\"", "\"").trim().to_string()
}

/// 把文本切成非空行，兼容 `\r\n`
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_line(" a , b ,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_comma() {
        assert_eq!(parse_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(parse_line(r#""say ""hi""""#), vec![r#"say "hi""#]);
        assert_eq!(
            parse_line(r#"x,"He said ""go"", then left",y"#),
            vec!["x", r#"He said "go", then left"#, "y"]
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(parse_line(""), vec![""]);
        assert_eq!(parse_line("a,,b"), vec!["a", "", "b"]);
        assert_eq!(parse_line("a,"), vec!["a", ""]);
        assert_eq!(parse_line(r#""""#), vec![""]);
    }

    #[test]
    fn test_quote_after_leading_space() {
        assert_eq!(parse_line(r#"a, "b,c""#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_unquoted_field_with_stray_quotes() {
        assert_eq!(parse_line(r#"a,b"",c"#), vec!["a", r#"b""#, "c"]);
        assert_eq!(parse_line(r#"x"y""z,w"#), vec![r#"x"y"z"#, "w"]);
    }

    #[test]
    fn test_unterminated_quote_degrades() {
        assert_eq!(parse_line(r#""abc,def"#), vec!["abc,def"]);
    }

    #[test]
    fn test_split_lines_skips_blank() {
        let text = "name,desc\r\n\r\nAcme,Gear\n   \nBeta,Stuff";
        let lines: Vec<&str> = split_lines(text).collect();
        assert_eq!(lines, vec!["name,desc", "Acme,Gear", "Beta,Stuff"]);
    }
}
