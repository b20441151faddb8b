use std::collections::HashMap;

/// 按 host 去重，同一 host 优先保留 https
///
/// host 取第一个 `//` 之后的全部内容。https 总是覆盖已有条目，http 只在该 host
/// 尚无条目时写入；无法按 `//` 切分或 scheme 不是 http/https 的输入被跳过。
/// 输出顺序为各 host 首次占位的顺序。
pub fn prefer_https<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut chosen: Vec<String> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for url in urls {
        let url = url.as_ref();
        let Some((scheme, host)) = url.split_once("//") else {
            skipped += 1;
            continue;
        };

        match (scheme, slots.get(host).copied()) {
            ("https:", Some(slot)) => chosen[slot] = url.to_string(),
            ("https:", None) | ("http:", None) => {
                slots.insert(host.to_string(), chosen.len());
                chosen.push(url.to_string());
            }
            ("http:", Some(_)) => {}
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} malformed or non-http URLs", skipped);
    }

    chosen
}
