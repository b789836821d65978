//! Pipeline Module
//!
//! Fluent Builder APIを提供し、変換パイプラインのファサードを構築する。
//! パイプラインは抽出 → レポート生成 → ログ追記を直列に実行し、
//! 成否にかかわらず一様な構造化アウトカムを返します。

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::activity_log::ActivityLog;
use crate::api::PageSize;
use crate::error::AutoDocError;
use crate::extractor;
use crate::report::ReportRenderer;
use crate::types::ReportMetadata;

/// パイプラインの設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct PipelineConfig {
    /// レポートの出力先ディレクトリ
    pub output_dir: PathBuf,

    /// アクティビティログのパス
    pub log_path: PathBuf,

    /// レポートのページサイズ
    pub page_size: PageSize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated_reports"),
            log_path: PathBuf::from("report_log.csv"),
            page_size: PageSize::Letter,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Pipeline`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use autodoc::{PageSize, PipelineBuilder};
///
/// # fn main() -> Result<(), autodoc::AutoDocError> {
/// let pipeline = PipelineBuilder::new()
///     .with_output_dir("reports")
///     .with_page_size(PageSize::A4)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PipelineBuilder {
    /// 内部設定（構築中）
    config: PipelineConfig,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力ディレクトリ: `generated_reports`
    /// - ログパス: `report_log.csv`
    /// - ページサイズ: レター
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// レポートの出力先ディレクトリを指定する
    ///
    /// ディレクトリは`build()`時に作成されます（存在しない場合）。
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// アクティビティログファイルのパスを指定する
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// レポートのページサイズを指定する
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// 設定を検証し、`Pipeline`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Pipeline)` - 設定が有効な場合
    /// * `Err(AutoDocError::Config)` - 設定が無効な場合（空のパス、
    ///   出力ディレクトリを作成できない場合など）
    pub fn build(self) -> Result<Pipeline, AutoDocError> {
        // 1. パスの検証
        if self.config.output_dir.as_os_str().is_empty() {
            return Err(AutoDocError::Config(
                "Output directory must not be empty".to_string(),
            ));
        }
        if self.config.log_path.as_os_str().is_empty() {
            return Err(AutoDocError::Config(
                "Log path must not be empty".to_string(),
            ));
        }

        // 2. 出力ディレクトリの作成
        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            AutoDocError::Config(format!(
                "Failed to create output directory {}: {}",
                self.config.output_dir.display(),
                e
            ))
        })?;

        // 3. Pipelineインスタンス生成
        Ok(Pipeline::new(self.config))
    }
}

/// 1回のパイプライン実行の構造化アウトカム
///
/// 成功・失敗のどちらでも呼び出し側には同じ形の結果が返ります。
/// 呼び出し側はエラーを捕捉するのではなく、ステータスで分岐します。
/// JSONにシリアライズすると`status`フィールド（`"success"` / `"error"`）
/// を持つオブジェクトになります。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PipelineOutcome {
    /// パイプラインが完了した
    Success {
        /// 人間可読のメッセージ
        message: String,
        /// 生成されたレポートドキュメントのパス
        filepath: String,
        /// レポートID
        report_id: String,
        /// コンポーネント数
        component_count: usize,
    },

    /// いずれかのステージで失敗した
    Error {
        /// 失敗内容を説明するメッセージ
        message: String,
    },
}

impl PipelineOutcome {
    /// 成功したかどうかを判定
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success { .. })
    }

    /// メッセージを取得
    pub fn message(&self) -> &str {
        match self {
            PipelineOutcome::Success { message, .. } => message,
            PipelineOutcome::Error { message } => message,
        }
    }

    /// レポートIDを取得（成功時のみ）
    pub fn report_id(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Success { report_id, .. } => Some(report_id),
            PipelineOutcome::Error { .. } => None,
        }
    }

    /// 生成されたドキュメントのパスを取得（成功時のみ）
    pub fn filepath(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Success { filepath, .. } => Some(filepath),
            PipelineOutcome::Error { .. } => None,
        }
    }

    /// コンポーネント数を取得（成功時のみ）
    pub fn component_count(&self) -> Option<usize> {
        match self {
            PipelineOutcome::Success {
                component_count, ..
            } => Some(*component_count),
            PipelineOutcome::Error { .. } => None,
        }
    }
}

/// 変換パイプラインのファサード
///
/// Excelファイルからレポートドキュメントを生成するためのメイン
/// エントリーポイントです。`PipelineBuilder`で構築された設定に
/// 基づいて、抽出 → レポート生成 → ログ追記を順に実行します。
///
/// 各実行は単一スレッドの同期処理で、内部並列性はありません。
/// 再実行の冪等性もありません。同じ入力で再実行すると、新しい
/// タイムスタンプ由来のレポートIDと新しいログ行が生成されます。
#[derive(Debug)]
pub struct Pipeline {
    /// レポートレンダラー
    renderer: ReportRenderer,

    /// アクティビティログ
    log: ActivityLog,
}

impl Pipeline {
    pub(crate) fn new(config: PipelineConfig) -> Self {
        Self {
            renderer: ReportRenderer::new(config.output_dir, config.page_size),
            log: ActivityLog::at(config.log_path),
        }
    }

    /// このパイプラインが書き込むアクティビティログへの参照を返す
    ///
    /// ダッシュボード用の集計ビュー（`entries` / `stats`）にアクセス
    /// するために使用します。
    pub fn activity_log(&self) -> &ActivityLog {
        &self.log
    }

    /// パイプラインを実行する
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックからコンポーネントレコードを抽出
    /// 2. レポートドキュメントを生成・書き込み
    /// 3. アクティビティログに1行追記
    ///
    /// 抽出または生成に失敗した場合、ログには何も書き込まれません。
    /// ログ追記に失敗した場合、ドキュメントは既に書き込まれていますが、
    /// アウトカムはエラーになります。
    ///
    /// # 引数
    ///
    /// * `source` - 入力Excelファイルのパス
    /// * `project_name` - プロジェクト名
    /// * `engineer` - 担当エンジニア名
    ///
    /// # 戻り値
    ///
    /// 成否を`status`で示す構造化アウトカム。エラーはこの関数の外に
    /// 伝播しません。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use autodoc::PipelineBuilder;
    ///
    /// # fn main() -> Result<(), autodoc::AutoDocError> {
    /// let pipeline = PipelineBuilder::new().build()?;
    /// let outcome = pipeline.run("components.xlsx", "Substation Alpha", "J. Smith");
    ///
    /// match outcome.report_id() {
    ///     Some(id) => println!("generated {}", id),
    ///     None => eprintln!("failed: {}", outcome.message()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(
        &self,
        source: impl AsRef<Path>,
        project_name: &str,
        engineer: &str,
    ) -> PipelineOutcome {
        match self.run_inner(source.as_ref(), project_name, engineer) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "pipeline run failed");
                PipelineOutcome::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    fn run_inner(
        &self,
        source: &Path,
        project_name: &str,
        engineer: &str,
    ) -> Result<PipelineOutcome, AutoDocError> {
        tracing::info!(source = %source.display(), "parsing workbook");
        let records = extractor::extract_components_from_path(source)?;
        tracing::info!(count = records.len(), "extracted components");

        let meta = ReportMetadata::generate(project_name, engineer, records.len());
        tracing::info!(report_id = %meta.report_id, "generating report");
        let path = self.renderer.write_report(&records, &meta)?;

        tracing::info!(path = %path.display(), "logging result");
        let filepath = path.to_string_lossy().to_string();
        self.log.append(
            &meta.report_id,
            project_name,
            records.len(),
            &filepath,
            "Success",
        )?;

        Ok(PipelineOutcome::Success {
            message: format!("Report generated: {}", filepath),
            filepath,
            report_id: meta.report_id,
            component_count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_pipeline_builder_defaults() {
        let builder = PipelineBuilder::new();
        assert_eq!(
            builder.config.output_dir,
            PathBuf::from("generated_reports")
        );
        assert_eq!(builder.config.log_path, PathBuf::from("report_log.csv"));
        assert_eq!(builder.config.page_size, PageSize::Letter);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = PipelineBuilder::new()
            .with_output_dir("reports")
            .with_log_path("reports/activity.csv")
            .with_page_size(PageSize::A4);

        assert_eq!(builder.config.output_dir, PathBuf::from("reports"));
        assert_eq!(
            builder.config.log_path,
            PathBuf::from("reports/activity.csv")
        );
        assert_eq!(builder.config.page_size, PageSize::A4);
    }

    #[test]
    fn test_build_creates_output_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("reports");

        let result = PipelineBuilder::new()
            .with_output_dir(&out)
            .with_log_path(dir.path().join("log.csv"))
            .build();

        assert!(result.is_ok());
        assert!(out.is_dir());
    }

    #[test]
    fn test_build_with_empty_output_dir() {
        let result = PipelineBuilder::new().with_output_dir("").build();
        match result {
            Err(AutoDocError::Config(msg)) => {
                assert!(msg.contains("Output directory"));
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_empty_log_path() {
        let dir = tempdir().unwrap();
        let result = PipelineBuilder::new()
            .with_output_dir(dir.path().join("out"))
            .with_log_path("")
            .build();
        match result {
            Err(AutoDocError::Config(msg)) => {
                assert!(msg.contains("Log path"));
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_run_with_missing_source_is_error_outcome() {
        let dir = tempdir().unwrap();
        let pipeline = PipelineBuilder::new()
            .with_output_dir(dir.path().join("out"))
            .with_log_path(dir.path().join("log.csv"))
            .build()
            .unwrap();

        let outcome = pipeline.run(dir.path().join("missing.xlsx"), "P", "E");

        assert!(!outcome.is_success());
        assert!(outcome.report_id().is_none());
        assert!(outcome.filepath().is_none());
        // 失敗した実行はログに何も書かない
        assert!(pipeline.activity_log().entries().unwrap().is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let success = PipelineOutcome::Success {
            message: "Report generated: out/r.md".to_string(),
            filepath: "out/r.md".to_string(),
            report_id: "RPT-20260806-143052".to_string(),
            component_count: 2,
        };
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["report_id"], "RPT-20260806-143052");
        assert_eq!(value["component_count"], 2);

        let error = PipelineOutcome::Error {
            message: "boom".to_string(),
        };
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "boom");
    }

    #[test]
    fn test_outcome_accessors() {
        let success = PipelineOutcome::Success {
            message: "ok".to_string(),
            filepath: "out/r.md".to_string(),
            report_id: "RPT-1".to_string(),
            component_count: 4,
        };
        assert!(success.is_success());
        assert_eq!(success.message(), "ok");
        assert_eq!(success.filepath(), Some("out/r.md"));
        assert_eq!(success.component_count(), Some(4));

        let error = PipelineOutcome::Error {
            message: "bad".to_string(),
        };
        assert!(!error.is_success());
        assert_eq!(error.message(), "bad");
        assert_eq!(error.component_count(), None);
    }
}
