//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// autodocクレート全体で使用するエラー型
///
/// このエラー型は、Excelファイルの読み込み、レポート生成、アクティビティログ
/// への追記処理中に発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `NoSheets`: ワークブックにシートが1つも存在しないエラー
/// - `Render`: レポートドキュメントの組み立て・書き込みに失敗したエラー
/// - `Log`: アクティビティログへの追記に失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use autodoc::AutoDocError;
/// use std::fs::File;
///
/// fn open_workbook(path: &str) -> Result<(), AutoDocError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum AutoDocError {
    /// I/O操作中に発生したエラー
    ///
    /// ファイルの読み込み失敗、書き込み失敗など、標準ライブラリの
    /// `std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// ワークブックにシートが存在しないエラー
    ///
    /// 抽出対象のワークブックにシートが1つも含まれていない場合に発生します。
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// レポートドキュメントの生成に失敗したエラー
    ///
    /// レポートの組み立て、または出力先への書き込みに失敗した場合に
    /// 発生します。部分的に書き込まれたファイルはクリーンアップされません。
    #[error("Failed to render report: {0}")]
    Render(String),

    /// アクティビティログへの追記に失敗したエラー
    ///
    /// レポート生成後、ログストアへの追記に失敗した場合に発生します。
    /// この時点でレポートドキュメント自体は既に書き込まれています。
    #[error("Failed to append activity log: {0}")]
    Log(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `PipelineBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、出力ディレクトリが作成できない場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use autodoc::{PipelineBuilder, AutoDocError};
    ///
    /// let result = PipelineBuilder::new()
    ///     .with_output_dir("")  // 無効な出力先
    ///     .build();
    ///
    /// match result {
    ///     Err(AutoDocError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Ioエラーのテスト
    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: AutoDocError = io_err.into();

        match error {
            AutoDocError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: AutoDocError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    // Parseエラーのテスト
    #[test]
    fn test_parse_error() {
        let parse_err = calamine::Error::Msg("Invalid file format");
        let error: AutoDocError = parse_err.into();

        match error {
            AutoDocError::Parse(e) => match e {
                calamine::Error::Msg(msg) => {
                    assert_eq!(msg, "Invalid file format");
                }
                _ => panic!("Expected Msg variant"),
            },
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: AutoDocError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse workbook"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_no_sheets_error_display() {
        let error = AutoDocError::NoSheets;
        assert_eq!(error.to_string(), "Workbook contains no sheets");
    }

    // Renderエラーのテスト
    #[test]
    fn test_render_error_display() {
        let error = AutoDocError::Render("disk full".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Failed to render report"));
        assert!(error_msg.contains("disk full"));
    }

    // Logエラーのテスト
    #[test]
    fn test_log_error_display() {
        let error = AutoDocError::Log("permission denied".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Failed to append activity log"));
        assert!(error_msg.contains("permission denied"));
    }

    // Configエラーのテスト
    #[test]
    fn test_config_error() {
        let error = AutoDocError::Config("Output directory is empty".to_string());

        match error {
            AutoDocError::Config(msg) => {
                assert_eq!(msg, "Output directory is empty");
            }
            _ => panic!("Expected Config error"),
        }
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), AutoDocError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        let result = io_operation();
        assert!(result.is_err());

        match result {
            Err(AutoDocError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        // Io
        let io_err: AutoDocError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        // Parse
        let parse_err: AutoDocError = calamine::Error::Msg("test parse").into();
        assert!(parse_err.to_string().starts_with("Failed to parse workbook"));

        // Render
        let render_err = AutoDocError::Render("test render".to_string());
        assert!(render_err.to_string().starts_with("Failed to render report"));

        // Log
        let log_err = AutoDocError::Log("test log".to_string());
        assert!(log_err
            .to_string()
            .starts_with("Failed to append activity log"));

        // Config
        let config_err = AutoDocError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));
    }
}
