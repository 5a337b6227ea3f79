//! Built-in message tables.
//!
//! Every table covers the same keys. Templates use the positional
//! placeholders understood by [`format_message`](formcheck_validate::format_message).

/// English messages. These match the untranslated defaults.
pub const EN: &[(&str, &str)] = &[
    ("validation.required", "Required"),
    ("validation.min", "Minimum is {0}"),
    ("validation.max", "Maximum is {0}"),
    ("validation.range", "Range is {0} to {1}"),
    ("validation.min_size", "Minimum size is {0}"),
    ("validation.max_size", "Maximum size is {0}"),
    ("validation.length", "Required length is {0}"),
    ("validation.size_range", "Size must be between {0} and {1}"),
    ("validation.match", "Must match {0}"),
    ("validation.pattern", "Invalid format"),
    ("validation.email", "Must be a valid email address"),
    ("validation.domain", "Must be a valid domain address"),
    ("validation.url", "Must be a valid URL address"),
    ("validation.ip_addr", "Must be a valid IP address"),
    ("validation.mac_addr", "Must be a valid MAC address"),
    ("validation.pure_text", "Must be a valid text"),
    ("validation.file_path", "Must be a sanitary file path"),
    ("validation.time_start_end", "Start time must not be later than end time"),
];

/// Simplified Chinese messages.
pub const ZH: &[(&str, &str)] = &[
    ("validation.required", "必填字段"),
    ("validation.min", "最小值为{0}"),
    ("validation.max", "最大值为{0}"),
    ("validation.range", "取值范围为{0}到{1}"),
    ("validation.min_size", "最小长度为{0}"),
    ("validation.max_size", "最大长度为{0}"),
    ("validation.length", "长度必须为{0}"),
    ("validation.size_range", "长度必须在{0}到{1}之间"),
    ("validation.match", "必须匹配{0}"),
    ("validation.pattern", "格式无效"),
    ("validation.email", "必须是有效的电子邮件地址"),
    ("validation.domain", "必须是有效的域名"),
    ("validation.url", "必须是有效的URL地址"),
    ("validation.ip_addr", "必须是有效的IP地址"),
    ("validation.mac_addr", "必须是有效的MAC地址"),
    ("validation.pure_text", "必须是有效的文本"),
    ("validation.file_path", "必须是安全的文件路径"),
    ("validation.time_start_end", "开始时间不能晚于结束时间"),
];

/// Built-in tables by locale.
pub const BUILTIN: &[(&str, &[(&str, &str)])] = &[("en", EN), ("zh", ZH)];

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_validate::check::{
        Check, Domain, Email, FilePath, IpAddr, Length, MacAddr, Match, Max, MaxSize, Min,
        MinSize, PureText, Range, Required, TimeStartEnd, Url,
    };
    use formcheck_validate::format_message;
    use std::collections::BTreeSet;

    fn keys<'a>(table: &[(&'a str, &'a str)]) -> BTreeSet<&'a str> {
        table.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn tables_cover_the_same_keys() {
        assert_eq!(keys(EN), keys(ZH));
        assert_eq!(keys(EN).len(), EN.len());
    }

    #[test]
    fn english_matches_check_defaults() {
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(Required),
            Box::new(Min::new(3)),
            Box::new(Max::new(2.5)),
            Box::new(Range::new(1, 10)),
            Box::new(MinSize::new(2)),
            Box::new(MaxSize::new(8)),
            Box::new(Length::new(4)),
            Box::new(Match::new("[0-9]+").unwrap()),
            Box::new(Email),
            Box::new(Domain),
            Box::new(Url),
            Box::new(IpAddr::any()),
            Box::new(MacAddr),
            Box::new(PureText::default()),
            Box::new(FilePath::default()),
            Box::new(TimeStartEnd),
        ];
        for check in checks {
            let (key, args) = check.message_key();
            let template = EN
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, template)| *template)
                .unwrap_or_else(|| panic!("missing English entry for {key}"));
            assert_eq!(format_message(template, &args), check.default_message(), "{key}");
        }
    }
}
