//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// レポートのページサイズ
///
/// 生成されるレポートドキュメントのページサイズを指定します。
/// テキストベースのレポートでは、ページサイズは1行あたりの
/// コンテンツ幅（表示桁数）として扱われます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageSize {
    /// レターサイズ（デフォルト）
    ///
    /// コンテンツ幅: 96桁
    Letter,

    /// A4サイズ
    ///
    /// コンテンツ幅: 90桁
    A4,
}

impl PageSize {
    /// ページサイズに対応するコンテンツ幅（表示桁数）を返す
    ///
    /// コンポーネント表の列幅は、この値を列数で均等に分割して決定されます。
    pub fn content_width(&self) -> usize {
        match self {
            PageSize::Letter => 96,
            PageSize::A4 => 90,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Letter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_width() {
        assert_eq!(PageSize::Letter.content_width(), 96);
        assert_eq!(PageSize::A4.content_width(), 90);
    }

    #[test]
    fn test_default_is_letter() {
        assert_eq!(PageSize::default(), PageSize::Letter);
    }
}
