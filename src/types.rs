//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{DateTime, Local};

/// 1行分のコンポーネントデータを表すレコード
///
/// 列名から文字列値へのマッピングです。キー集合は実行時に入力ファイルの
/// ヘッダー行から決定されるため、固定フィールドの構造体ではなく、
/// 挿入順序を保持する明示的なキー列として表現します。
/// コンポーネント表の列順序は先頭レコードのキー順序によって決まるため、
/// 順序の保持は仕様上の要件です。
///
/// `insert`は後勝ち（last-write-wins）です。ヘッダー行に同名の列が
/// 重複して存在する場合、後の列の値が先の列の値を上書きします。
/// これは元データ仕様の既知の挙動であり、修正対象ではありません。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentRecord {
    /// (列名, 値) のペア列（挿入順序を保持）
    fields: Vec<(String, String)>,
}

impl ComponentRecord {
    /// 空のレコードを生成
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// キーと値を挿入する
    ///
    /// 既存のキーが存在する場合は値を上書きします（位置は最初の挿入位置を
    /// 維持）。存在しない場合は末尾に追加します。
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// キーに対応する値を取得する
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// キーを挿入順に列挙する
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// (キー, 値) ペアを挿入順に列挙する
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// フィールド数を返す
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// フィールドが存在しないかを判定
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// レポートの識別・コンテキスト情報
///
/// レポート生成時に構築され、出力ドキュメントとアクティビティログの
/// 両方に埋め込まれます。構築後は変更されません。
///
/// レポートIDは生成時刻から導出されます（`RPT-<YYYYMMDD>-<HHMMSS>`）。
/// 秒精度のため、同一秒内の生成ではIDが衝突し得ますが、これは
/// 許容される挙動です。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMetadata {
    /// レポートID（例: `RPT-20260806-143052`）
    pub report_id: String,

    /// プロジェクト名
    pub project: String,

    /// 担当エンジニア名
    pub engineer: String,

    /// 生成時刻（ローカルクロック）
    pub generated_at: DateTime<Local>,

    /// コンポーネント数
    pub component_count: usize,
}

impl ReportMetadata {
    /// 現在時刻からメタデータを生成する
    pub fn generate(project: &str, engineer: &str, component_count: usize) -> Self {
        Self::at(project, engineer, component_count, Local::now())
    }

    /// 指定時刻からメタデータを生成する
    pub fn at(
        project: &str,
        engineer: &str,
        component_count: usize,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            report_id: format!("RPT-{}", timestamp.format("%Y%m%d-%H%M%S")),
            project: project.to_string(),
            engineer: engineer.to_string(),
            generated_at: timestamp,
            component_count,
        }
    }

    /// ドキュメント表示用の生成時刻文字列（例: `August 06, 2026  14:30:52`）
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%B %d, %Y  %H:%M:%S").to_string()
    }
}
