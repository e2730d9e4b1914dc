// 探索の既定値とユーティリティ型定義

use nohash_hasher::BuildNoHashHasher;

/// ====== 進捗・ポーリング既定値 ======
/// 進捗サンプルを送る間隔（処理済みフレーム数）
pub const DEFAULT_UPDATE_INTERVAL_CHECKS: u64 = 30_000;
/// 進捗チャネルの容量（満杯時は進捗サンプルを捨てる）
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
/// 呼び出し側がチャネルをポーリングする間隔（ミリ秒）
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// 近傍の評価順（下, 上, 右, 左）。探索順の再現性はこの順序に依存する
pub const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// セル番号（row * n + col）専用のノーハッシュ集合
pub type CellSet = std::collections::HashSet<usize, BuildNoHashHasher<usize>>;
pub type CellMap<V> = std::collections::HashMap<usize, V, BuildNoHashHasher<usize>>;
