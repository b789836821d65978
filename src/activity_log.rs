//! Activity Log Module
//!
//! 追記専用のCSVログストアと、それを読み取る2つの集計ビューを提供する
//! モジュール。パイプラインが1回成功するごとに1行が追記され、
//! ダッシュボードが全行を読み取ります。

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::error::AutoDocError;

/// ログファイルの固定ヘッダー行
const LOG_HEADER: &str = "report_id,project,component_count,filepath,status,generated_at";

/// アクティビティログの1行分のレコード
///
/// 1回の完了したパイプライン実行に対応します。`generated_at`は
/// 追記時にサーバー側で生成されたローカル時刻（`YYYY-MM-DD HH:MM:SS`）です。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// レポートID
    pub report_id: String,

    /// プロジェクト名
    pub project: String,

    /// コンポーネント数
    pub component_count: u64,

    /// 生成されたレポートドキュメントのパス
    pub filepath: String,

    /// 実行ステータス（実際に書き込まれるのは`"Success"`のみ）
    pub status: String,

    /// 追記時刻（`YYYY-MM-DD HH:MM:SS`）
    pub generated_at: String,
}

/// 日別の実行回数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// 日付（`YYYY-MM-DD`）
    pub date: String,

    /// 実行回数
    pub count: u64,
}

/// プロジェクト別の実行回数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCount {
    /// プロジェクト名
    pub project: String,

    /// 実行回数
    pub count: u64,
}

/// アクティビティログの集計統計
///
/// ダッシュボードの統計ビューが消費する形です。ログストアが存在しない
/// 場合はすべてゼロ・空の形になります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct LogStats {
    /// 総実行回数
    pub total: u64,

    /// ステータスが`"Success"`の行数
    pub success: u64,

    /// エラー数（total - success）
    pub error: u64,

    /// 全行のコンポーネント数の合計
    pub total_components: u64,

    /// 日別実行回数（日付昇順）
    pub by_day: Vec<DayCount>,

    /// プロジェクト別実行回数（初出順）
    pub by_project: Vec<ProjectCount>,
}

/// 追記専用のアクティビティログストア
///
/// フラットなUTF-8のカンマ区切りテキストファイルです。ヘッダー行は
/// ファイルが存在しない場合の初回追記時に一度だけ書き込まれます。
/// 行の更新・削除は行いません。
///
/// 並行する書き込みは調整されません。複数プロセスからの同時追記に
/// 対する保護は、プラットフォームの短い追記書き込みの原子性のみです。
///
/// # 使用例
///
/// ```rust,no_run
/// use autodoc::ActivityLog;
///
/// # fn main() -> Result<(), autodoc::AutoDocError> {
/// let log = ActivityLog::at("report_log.csv");
/// log.append("RPT-20260806-143052", "Substation Alpha", 5,
///            "generated_reports/RPT-20260806-143052_Substation_Alpha.md", "Success")?;
///
/// let stats = log.stats()?;
/// println!("{} runs", stats.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ActivityLog {
    /// ログファイルのパス
    path: PathBuf,
}

impl ActivityLog {
    /// 指定されたパスのログストアを参照する
    ///
    /// ファイルはこの時点では作成されません。最初の`append`で作成されます。
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ログファイルのパスを返す
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1行を追記する
    ///
    /// ファイルが存在しない場合は、先にヘッダー行を書き込みます。
    /// `generated_at`は呼び出し時点のローカルクロックから生成されます。
    /// 重複排除は行いません。
    ///
    /// # 引数
    ///
    /// * `report_id` - レポートID
    /// * `project` - プロジェクト名
    /// * `component_count` - コンポーネント数
    /// * `filepath` - 生成されたドキュメントのパス
    /// * `status` - 実行ステータス
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 追記に成功した場合
    /// * `Err(AutoDocError::Log)` - ファイルを開けない、または書き込みに
    ///   失敗した場合
    pub fn append(
        &self,
        report_id: &str,
        project: &str,
        component_count: usize,
        filepath: &str,
        status: &str,
    ) -> Result<(), AutoDocError> {
        let file_exists = self.path.is_file();

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| AutoDocError::Log(format!("{}: {}", self.path.display(), e)))?;

        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let count = component_count.to_string();
        let fields = [report_id, project, &count, filepath, status, &generated_at];

        let mut buf = String::new();
        if !file_exists {
            buf.push_str(LOG_HEADER);
            buf.push('\n');
        }
        let row: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
        buf.push_str(&row.join(","));
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .map_err(|e| AutoDocError::Log(format!("{}: {}", self.path.display(), e)))?;

        Ok(())
    }

    /// 全ログ行をそのまま順序付きで返す（集計ビューA）
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<LogEntry>)` - ファイル内の順序どおりの全データ行。
    ///   ログストアが存在しない場合は空のVec
    /// * `Err(AutoDocError::Io)` - 読み込みに失敗した場合
    pub fn entries(&self) -> Result<Vec<LogEntry>, AutoDocError> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let entries = content
            .lines()
            .skip(1) // ヘッダー行
            .filter(|line| !line.is_empty())
            .map(|line| {
                let fields = split_csv_line(line);
                let field = |idx: usize| fields.get(idx).cloned().unwrap_or_default();
                LogEntry {
                    report_id: field(0),
                    project: field(1),
                    component_count: field(2).parse().unwrap_or(0),
                    filepath: field(3),
                    status: field(4),
                    generated_at: field(5),
                }
            })
            .collect();

        Ok(entries)
    }

    /// ログ全体の集計統計を計算する（集計ビューB）
    ///
    /// # 戻り値
    ///
    /// * `Ok(LogStats)` - 集計結果。ログストアが存在しない場合は
    ///   すべてゼロ・空の形
    /// * `Err(AutoDocError::Io)` - 読み込みに失敗した場合
    pub fn stats(&self) -> Result<LogStats, AutoDocError> {
        let entries = self.entries()?;

        let total = entries.len() as u64;
        let success = entries.iter().filter(|e| e.status == "Success").count() as u64;
        let total_components = entries.iter().map(|e| e.component_count).sum();

        // 日別集計: generated_atの先頭10文字（YYYY-MM-DD）、日付昇順
        let mut by_day: std::collections::BTreeMap<String, u64> = Default::default();
        for entry in &entries {
            let day: String = entry.generated_at.chars().take(10).collect();
            *by_day.entry(day).or_default() += 1;
        }

        // プロジェクト別集計: 初出順
        let mut by_project: Vec<ProjectCount> = Vec::new();
        for entry in &entries {
            match by_project.iter_mut().find(|p| p.project == entry.project) {
                Some(p) => p.count += 1,
                None => by_project.push(ProjectCount {
                    project: entry.project.clone(),
                    count: 1,
                }),
            }
        }

        Ok(LogStats {
            total,
            success,
            error: total - success,
            total_components,
            by_day: by_day
                .into_iter()
                .map(|(date, count)| DayCount { date, count })
                .collect(),
            by_project,
        })
    }
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// CSVの1行をフィールド列に分解する
///
/// `escape_csv`の逆変換です。クォート内のカンマと2連ダブルクォートを
/// 処理します。
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}
