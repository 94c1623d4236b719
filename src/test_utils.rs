//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用される辞書ソースのテストダブルを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::Notify;

use crate::dictionary::Dictionary;
use crate::loader::{
    DictionarySource,
    SourceError,
};
use crate::locale::Locale;

/// 固定の辞書を返すソース。フェッチ回数を数える。
pub(crate) struct StaticSource {
    /// ロケール → 辞書ドキュメント
    dictionaries: HashMap<Locale, Value>,

    /// フェッチ試行回数（失敗も含む）
    fetches: AtomicUsize,
}

impl StaticSource {
    /// (ロケール, ドキュメント) のペアからソースを作成
    pub(crate) fn new(pairs: &[(Locale, Value)]) -> Self {
        Self {
            dictionaries: pairs.iter().cloned().collect(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// これまでのフェッチ試行回数
    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DictionarySource for StaticSource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.dictionaries.get(&locale).cloned().map(Dictionary::new).ok_or_else(|| {
            SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no dictionary for {locale}"),
            ))
        })
    }
}

/// 常に失敗するソース
pub(crate) struct FailingSource;

impl DictionarySource for FailingSource {
    async fn fetch(&self, _locale: Locale) -> Result<Dictionary, SourceError> {
        Err(SourceError::Io(std::io::Error::other("source unavailable")))
    }
}

/// フェッチの完了をテスト側から制御できるソース。
///
/// `fetch` はロケールごとのゲートが `release` されるまで完了しない。
/// 重なった `set_locale` の完了順を並べ替えるテストに使う。
#[derive(Clone)]
pub(crate) struct GatedSource {
    /// 共有内部状態
    inner: Arc<GateState>,
}

/// `GatedSource` の共有状態
struct GateState {
    /// ロケール → 辞書ドキュメント
    dictionaries: HashMap<Locale, Value>,

    /// ロケールごとの完了ゲート
    gates: HashMap<Locale, Notify>,

    /// fetch に突入済みのロケール
    entered: Mutex<HashSet<Locale>>,
}

impl GatedSource {
    /// (ロケール, ドキュメント) のペアからソースを作成
    pub(crate) fn new(pairs: &[(Locale, Value)]) -> Self {
        let gates = Locale::ALL.into_iter().map(|locale| (locale, Notify::new())).collect();
        Self {
            inner: Arc::new(GateState {
                dictionaries: pairs.iter().cloned().collect(),
                gates,
                entered: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// 同じ内部状態を共有するハンドルを返す
    pub(crate) fn handle(&self) -> Self {
        self.clone()
    }

    /// `locale` の fetch が開始されたかどうか
    pub(crate) fn entered(&self, locale: Locale) -> bool {
        self.inner.entered.lock().unwrap().contains(&locale)
    }

    /// `locale` の fetch を完了させる
    pub(crate) fn release(&self, locale: Locale) {
        if let Some(gate) = self.inner.gates.get(&locale) {
            gate.notify_one();
        }
    }
}

impl DictionarySource for GatedSource {
    async fn fetch(&self, locale: Locale) -> Result<Dictionary, SourceError> {
        self.inner.entered.lock().unwrap().insert(locale);

        if let Some(gate) = self.inner.gates.get(&locale) {
            gate.notified().await;
        }

        self.inner.dictionaries.get(&locale).cloned().map(Dictionary::new).ok_or_else(|| {
            SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no dictionary for {locale}"),
            ))
        })
    }
}
