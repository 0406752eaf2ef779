/// 環境変数で設定を上書きする際のプレフィックス
pub const SETTINGS_ENV_PREFIX: &str = "ERPKIT_";

/// 環境変数ユーティリティ
pub struct EnvVar;

impl EnvVar {
    /// 環境変数を取得（空文字列はNoneとして扱う）
    pub fn get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.is_empty())
    }

    /// 設定キーに対応する環境変数名
    ///
    /// `studio.source.dir` -> `ERPKIT_STUDIO_SOURCE_DIR`
    pub fn for_setting(key: &str) -> String {
        let suffix: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{}", SETTINGS_ENV_PREFIX, suffix)
    }
}
