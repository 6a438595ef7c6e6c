//! 区切りテキストの読み書き
//!
//! `"` で囲まれたフィールド内のカンマ・改行は区切りとして扱わない。
//! 囲み内の `""` は `"` 1文字として読む。

/// テキストをレコード単位に分割
///
/// 囲み内の改行はレコードの区切りにしない。行末の `\r` は残す。
pub fn split_records(content: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut field_blank = true;
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field_blank => {
                in_quotes = true;
                field_blank = false;
            }
            ',' if !in_quotes => field_blank = true,
            '\n' if !in_quotes => {
                records.push(&content[start..i]);
                start = i + 1;
                field_blank = true;
            }
            c if !in_quotes && !c.is_whitespace() => field_blank = false,
            _ => {}
        }
    }
    if start < content.len() {
        records.push(&content[start..]);
    }

    records
}

/// 1行をフィールドに分割
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                // フィールド先頭の引用符のみ囲みとして扱う
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// 書き込み用に1フィールドをエスケープ
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// フィールド列を1行（改行なし）に整形
pub fn format_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_records_plain_lines() {
        assert_eq!(split_records("a,1\nb,2\n"), vec!["a,1", "b,2"]);
        assert_eq!(split_records("a,1\nb,2"), vec!["a,1", "b,2"]);
        assert!(split_records("").is_empty());
    }

    #[test]
    fn test_split_records_keeps_quoted_newline() {
        let records = split_records("Category,Value\n\"Mail\nCalendar\",1.5\nMaps,0.5\n");
        assert_eq!(records, vec!["Category,Value", "\"Mail\nCalendar\",1.5", "Maps,0.5"]);
        assert_eq!(parse_csv_line(records[1]), vec!["Mail\nCalendar", "1.5"]);
    }

    #[test]
    fn test_split_records_quote_inside_field_is_literal() {
        // フィールド途中の引用符は囲みにならない
        assert_eq!(split_records("ab\"c,1\nd,2"), vec!["ab\"c,1", "d,2"]);
    }

    #[test]
    fn test_format_line_with_newline_round_trips() {
        let content = format!("{}\n", format_line(&["Line\nBreak", "2.0"]));
        let records = split_records(&content);
        assert_eq!(records.len(), 1);
        assert_eq!(parse_csv_line(records[0]), vec!["Line\nBreak", "2.0"]);
    }

    #[test]
    fn test_parse_simple_line() {
        assert_eq!(parse_csv_line("Instagram,3.5"), vec!["Instagram", "3.5"]);
    }

    #[test]
    fn test_parse_keeps_surrounding_spaces() {
        // 空白の除去は呼び出し側（ヘッダー照合）の責務
        assert_eq!(parse_csv_line(" Category , Value "), vec![" Category ", " Value "]);
    }

    #[test]
    fn test_parse_quoted_comma() {
        assert_eq!(
            parse_csv_line("\"Mail, Calendar\",1.0"),
            vec!["Mail, Calendar", "1.0"]
        );
    }

    #[test]
    fn test_parse_escaped_quote() {
        assert_eq!(
            parse_csv_line("\"The \"\"Best\"\" App\",2"),
            vec!["The \"Best\" App", "2"]
        );
    }

    #[test]
    fn test_parse_empty_fields() {
        assert_eq!(parse_csv_line(","), vec!["", ""]);
        assert_eq!(parse_csv_line("only"), vec!["only"]);
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("YouTube"), "YouTube");
        assert_eq!(escape_field("Mail, Calendar"), "\"Mail, Calendar\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_format_line_is_readable_by_parser() {
        let line = format_line(&["Mail, Calendar", "1.5"]);
        assert_eq!(parse_csv_line(&line), vec!["Mail, Calendar", "1.5"]);
    }
}
