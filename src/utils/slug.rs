//! Slug 工具函数
//!
//! `slugify` 从名称推导 URL 片段，`canonicalize` 去掉历史遗留的
//! `-coupon` / `-coupon-code` 后缀，用于统一新旧 URL。

/// 历史 URL 后缀，按长度从长到短排列
pub const LEGACY_SLUG_SUFFIXES: [&str; 2] = ["-coupon-code", "-coupon"];

/// 从名称推导 slug：小写、空白折叠为 `-`、去掉 `[a-z0-9-]` 以外的字符
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    slug
}

/// 规范化 slug，得到用于比较的 key
///
/// 小写并去掉首尾空白后，反复剥离末尾的旧后缀直到没有为止，
/// 因此对任意输入都满足 `canonicalize(canonicalize(s)) == canonicalize(s)`。
pub fn canonicalize(slug: &str) -> String {
    let mut current = slug.trim().to_lowercase();

    'strip: loop {
        for suffix in LEGACY_SLUG_SUFFIXES {
            if let Some(stripped) = current.strip_suffix(suffix) {
                current = stripped.trim().to_string();
                continue 'strip;
            }
        }
        return current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme Outdoor Gear"), "acme-outdoor-gear");
        assert_eq!(slugify("  Tabs\tand   spaces "), "tabs-and-spaces");
    }

    #[test]
    fn test_slugify_strips_symbols() {
        assert_eq!(slugify("Ben & Jerry's"), "ben--jerrys");
        assert_eq!(slugify("Café 24/7"), "caf-247");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_canonicalize_suffixes() {
        assert_eq!(canonicalize("store-name-coupon-code"), "store-name");
        assert_eq!(canonicalize("store-name-coupon"), "store-name");
        assert_eq!(canonicalize("store-name"), "store-name");
        assert_eq!(canonicalize("  Store-Name-Coupon-Code "), "store-name");
    }

    #[test]
    fn test_canonicalize_only_trailing() {
        assert_eq!(canonicalize("coupon-code-store"), "coupon-code-store");
        assert_eq!(canonicalize("couponland"), "couponland");
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for input in [
            "store-name-coupon-code",
            "x-coupon-coupon",
            "x-coupon-code-coupon",
            "abc -coupon",
            "-coupon",
            "",
            "Plain",
        ] {
            let once = canonicalize(input);
            assert_eq!(canonicalize(&once), once, "not idempotent for {input:?}");
        }
    }
}
