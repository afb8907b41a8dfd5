#![allow(clippy::restriction, clippy::too_many_lines)]

use std::{
    cell::Cell,
    sync::atomic::{AtomicUsize, Ordering},
};

use iroha_data_model::{
    account::{AccountDetailRecordId, AccountId},
    asset::AssetId,
    block::{BlockHeader, EncodedTransaction, SignedBlock},
    permission::{RolePermission, RolePermissionSet},
    query::{
        error::{error_code, ErrorQueryResponse, ErrorQueryType},
        response::{QueryResponse, TransactionsPageResponse},
        AccountDetailPaginationMeta, AssetPaginationMeta, GetAccount, GetAccountAssetTransactions,
        GetAccountAssets, GetAccountDetail, GetAccountTransactions, GetAssetInfo, GetBlock,
        GetPendingTransactions, GetRolePermissions, GetSignatories, GetTransactions,
        PendingTxPaginationMeta, Query, QueryExecutorResult, TxOrdering, TxPaginationMeta,
    },
    role::RoleId,
    transaction::{Command, SignedTransaction, TransactionPayload},
    HashOf,
};
use parity_scale_codec::Encode;
use proptest::prelude::*;
use rusqlite::{params, Connection};
use tempfile::TempDir;

use super::*;
use crate::{
    block::BlockDecoder,
    index::Index,
    kura::{self, BlockSource, BlockStore},
    pending::{PendingTransactionStorage, PendingTransactionsPool},
};

fn account(id: &str) -> AccountId {
    id.parse().unwrap()
}

fn asset(id: &str) -> AssetId {
    id.parse().unwrap()
}

fn transfer(creator: &str, to: &str, created_time: u64) -> SignedTransaction {
    SignedTransaction {
        payload: TransactionPayload {
            creator: account(creator),
            created_time,
            quorum: 1,
            commands: vec![Command::TransferAsset {
                src_account_id: account(creator),
                dest_account_id: account(to),
                asset_id: asset("coin#wonderland"),
                description: String::new(),
                amount: "1.00".to_owned(),
            }],
        },
        signatures: vec![],
    }
}

/// Entry of a committed block.
enum Entry {
    Transaction(SignedTransaction),
    /// Bytes which do not decode, indexed as a transaction of `creator`.
    Corrupted { creator: &'static str },
}

/// Ledger state index and block store kept consistent with each other.
struct Ledger {
    index: Index,
    store: BlockStore,
    pending: PendingTransactionsPool,
    dir: TempDir,
}

impl Ledger {
    /// Domain `wonderland` with accounts `alice`, `bob` and `carol` (role `user`),
    /// `auditor` (role `auditor`) and `admin` (role `admin`, granting root).
    fn new() -> Self {
        let _ = iroha_logger::test_logger();

        let index = Index::in_memory().unwrap();
        seed_world(index.connection());

        let dir = tempfile::tempdir().unwrap();
        let store = BlockStore::new(dir.path());

        Self {
            index,
            store,
            pending: PendingTransactionsPool::new(),
            dir,
        }
    }

    /// Ledger with two blocks: alice creates 7 transactions, bob creates 2.
    ///
    /// Block 1 holds `a0 b0 a1 a2`, block 2 holds `a3 b1 a4 a5 a6`; every
    /// transaction transfers `coin#wonderland` between alice and bob.
    fn alice_and_bob() -> (Self, Vec<SignedTransaction>, Vec<SignedTransaction>) {
        let mut ledger = Self::new();
        let alice: Vec<_> = (0..7)
            .map(|i| transfer("alice@wonderland", "bob@wonderland", 100 + i))
            .collect();
        let bob: Vec<_> = (0..2)
            .map(|i| transfer("bob@wonderland", "alice@wonderland", 200 + i))
            .collect();

        ledger.commit(
            [&alice[0], &bob[0], &alice[1], &alice[2]]
                .map(|tx| Entry::Transaction(tx.clone()))
                .into(),
        );
        ledger.commit(
            [&alice[3], &bob[1], &alice[4], &alice[5], &alice[6]]
                .map(|tx| Entry::Transaction(tx.clone()))
                .into(),
        );

        (ledger, alice, bob)
    }

    /// Append a block and index its transactions.
    fn commit(&mut self, entries: Vec<Entry>) -> u64 {
        let height = self.store.height().unwrap() + 1;
        let sql = self.index.connection();

        let mut transactions = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let (encoded, creator, created_time) = match entry {
                Entry::Transaction(transaction) => {
                    for command in &transaction.payload.commands {
                        if let Command::TransferAsset {
                            src_account_id,
                            dest_account_id,
                            asset_id,
                            ..
                        } = command
                        {
                            for account_id in [src_account_id, dest_account_id] {
                                sql.execute(
                                    "INSERT INTO position_by_account_asset VALUES (?1, ?2, ?3, ?4)",
                                    params![
                                        account_id.to_string(),
                                        asset_id.to_string(),
                                        height,
                                        position
                                    ],
                                )
                                .unwrap();
                            }
                        }
                    }
                    (
                        EncodedTransaction::new(&transaction),
                        transaction.creator().to_string(),
                        transaction.payload.created_time,
                    )
                }
                Entry::Corrupted { creator } => (
                    EncodedTransaction::from_raw(vec![0xFF; 3]),
                    creator.to_owned(),
                    0,
                ),
            };
            sql.execute(
                r#"INSERT INTO tx_positions (hash, creator_id, ts, height, "index") VALUES (?1, ?2, ?3, ?4, ?5)"#,
                params![encoded.hash().to_string(), creator, created_time, height, position],
            )
            .unwrap();
            transactions.push(encoded);
        }

        let block = SignedBlock {
            header: BlockHeader::new(height, None, height * 1000),
            transactions,
            rejected_transactions_hashes: vec![],
            signatures: vec![],
        };
        kura::append_block(self.dir.path(), &block.encode()).unwrap();
        height
    }

    fn executor(&self) -> QueryExecutor<'_> {
        QueryExecutor::new(self.index.connection(), &self.store, &self.pending)
    }

    fn run(&self, authority: &str, query: impl Into<Query>) -> QueryExecutorResult {
        run(&self.executor(), authority, query)
    }
}

fn run(executor: &QueryExecutor<'_>, authority: &str, query: impl Into<Query>) -> QueryExecutorResult {
    let query = query.into();
    let context = QueryContext::new(account(authority), &query);
    executor.execute(&context, &query)
}

fn seed_world(sql: &Connection) {
    use RolePermission::*;

    let roles = [
        (
            "user",
            vec![
                GetMyAccount,
                GetMySignatories,
                GetMyAccAst,
                GetMyAccDetail,
                GetMyAccTxs,
                GetMyAccAstTxs,
                GetMyTxs,
            ],
        ),
        (
            "auditor",
            vec![
                GetAllAccounts,
                GetAllSignatories,
                GetAllAccAst,
                GetAllAccDetail,
                GetAllAccTxs,
                GetAllAccAstTxs,
                GetAllTxs,
                GetBlocks,
                GetRoles,
                ReadAssets,
                GetPeers,
            ],
        ),
        ("admin", vec![Root]),
    ];
    for (role, permissions) in roles {
        let permissions: RolePermissionSet = permissions.into_iter().collect();
        sql.execute("INSERT INTO role (role_id) VALUES (?1)", params![role])
            .unwrap();
        sql.execute(
            "INSERT INTO role_has_permissions (role_id, permission) VALUES (?1, ?2)",
            params![role, permissions.to_string()],
        )
        .unwrap();
    }

    sql.execute_batch(
        r#"
        INSERT INTO domain (domain_id, default_role) VALUES ('wonderland', 'user');
        INSERT INTO account (account_id, domain_id, quorum, data) VALUES
            ('alice@wonderland', 'wonderland', 1,
             '{"alice@wonderland": {"age": "31"}, "bob@wonderland": {"age": "30", "city": "Kyoto"}}'),
            ('bob@wonderland', 'wonderland', 1, '{}'),
            ('carol@wonderland', 'wonderland', 2, '{}'),
            ('auditor@wonderland', 'wonderland', 1, '{}'),
            ('admin@wonderland', 'wonderland', 1, '{}');
        INSERT INTO account_has_roles (account_id, role_id) VALUES
            ('alice@wonderland', 'user'),
            ('bob@wonderland', 'user'),
            ('carol@wonderland', 'user'),
            ('auditor@wonderland', 'auditor'),
            ('admin@wonderland', 'admin');
        INSERT INTO account_has_signatory (account_id, public_key) VALUES
            ('alice@wonderland', 'a11ce0'),
            ('alice@wonderland', '0a11ce'),
            ('bob@wonderland', 'b0b0');
        INSERT INTO asset (asset_id, domain_id, precision) VALUES
            ('coin#wonderland', 'wonderland', 2),
            ('tea#wonderland', 'wonderland', 0);
        INSERT INTO account_has_asset (account_id, asset_id, amount) VALUES
            ('alice@wonderland', 'coin#wonderland', '10.00'),
            ('alice@wonderland', 'tea#wonderland', '3'),
            ('bob@wonderland', 'coin#wonderland', '5.00');
        "#,
    )
    .unwrap();
}

fn transactions_page(result: QueryExecutorResult) -> TransactionsPageResponse {
    match result {
        Ok(QueryResponse::TransactionsPage(page)) => page,
        other => panic!("expected a transactions page, got {other:?}"),
    }
}

fn assert_error(result: QueryExecutorResult, error_type: ErrorQueryType, code: u32) -> ErrorQueryResponse {
    let error = result.expect_err("query should fail");
    assert_eq!((error.error_type, error.error_code), (error_type, code), "{error}");
    error
}

fn hashes(transactions: &[SignedTransaction]) -> Vec<HashOf<SignedTransaction>> {
    transactions.iter().map(SignedTransaction::hash).collect()
}

struct CountingBlockSource<'store> {
    inner: &'store dyn BlockSource,
    reads: Cell<usize>,
}

impl<'store> CountingBlockSource<'store> {
    fn new(inner: &'store dyn BlockSource) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }
}

impl BlockSource for CountingBlockSource<'_> {
    fn height(&self) -> Result<u64, kura::Error> {
        self.reads.set(self.reads.get() + 1);
        self.inner.height()
    }

    fn read(&self, height: u64) -> Result<Option<Vec<u8>>, kura::Error> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read(height)
    }
}

#[derive(Default)]
struct CountingPendingStorage {
    inner: PendingTransactionsPool,
    reads: AtomicUsize,
}

impl PendingTransactionStorage for CountingPendingStorage {
    fn pending_transactions(&self, account_id: &AccountId) -> Vec<SignedTransaction> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.pending_transactions(account_id)
    }
}

struct FailingDecoder;

impl BlockDecoder for FailingDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<SignedBlock, parity_scale_codec::Error> {
        Err("corrupted block".into())
    }
}

#[test]
fn alice_pages_through_her_transactions() {
    let (ledger, alice, _) = Ledger::alice_and_bob();
    let query = |pagination| GetAccountTransactions::new(account("alice@wonderland"), pagination);

    let first = transactions_page(ledger.run("alice@wonderland", query(TxPaginationMeta::new(5))));
    assert_eq!(first.transactions, alice[..5]);
    assert_eq!(first.next_tx_hash, Some(alice[4].hash()));
    assert_eq!(first.all_transactions_size, 7);

    let second = transactions_page(ledger.run(
        "alice@wonderland",
        query(TxPaginationMeta::new(5).after(alice[4].hash())),
    ));
    assert_eq!(second.transactions, alice[5..]);
    assert_eq!(second.next_tx_hash, None);
    assert_eq!(second.all_transactions_size, 7);
}

#[test]
fn descending_order_starts_with_the_newest_transaction() {
    let (ledger, alice, _) = Ledger::alice_and_bob();
    let pagination = TxPaginationMeta::new(3).ordered(TxOrdering::Descending);

    let page = transactions_page(ledger.run(
        "auditor@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), pagination.clone()),
    ));
    assert_eq!(hashes(&page.transactions), hashes(&[alice[6].clone(), alice[5].clone(), alice[4].clone()]));
    assert_eq!(page.next_tx_hash, Some(alice[4].hash()));

    let page = transactions_page(ledger.run(
        "auditor@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), pagination.after(alice[2].hash())),
    ));
    assert_eq!(hashes(&page.transactions), hashes(&[alice[1].clone(), alice[0].clone()]));
    assert_eq!(page.next_tx_hash, None);
}

#[test]
fn exact_page_fit_names_a_cursor_to_an_empty_page() {
    let (ledger, alice, _) = Ledger::alice_and_bob();

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(
            account("alice@wonderland"),
            TxPaginationMeta::new(2).after(alice[4].hash()),
        ),
    ));
    assert_eq!(page.transactions, alice[5..]);
    assert_eq!(page.next_tx_hash, Some(alice[6].hash()));

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(
            account("alice@wonderland"),
            TxPaginationMeta::new(2).after(alice[6].hash()),
        ),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.next_tx_hash, None);
    assert_eq!(page.all_transactions_size, 7);
}

#[test]
fn zero_page_size_echoes_the_cursor() {
    let (ledger, alice, _) = Ledger::alice_and_bob();

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(
            account("alice@wonderland"),
            TxPaginationMeta::new(0).after(alice[1].hash()),
        ),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.next_tx_hash, Some(alice[1].hash()));
    assert_eq!(page.all_transactions_size, 7);

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), TxPaginationMeta::new(0)),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.next_tx_hash, None);
    assert_eq!(page.all_transactions_size, 7);
}

#[test]
fn height_and_time_bounds_restrict_the_listing() {
    let (ledger, alice, _) = Ledger::alice_and_bob();

    let mut pagination = TxPaginationMeta::new(10);
    pagination.first_tx_height = Some(2);
    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), pagination),
    ));
    assert_eq!(page.transactions, alice[3..]);
    assert_eq!(page.all_transactions_size, 4);

    let mut pagination = TxPaginationMeta::new(10);
    pagination.first_tx_time = Some(101);
    pagination.last_tx_time = Some(102);
    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), pagination),
    ));
    assert_eq!(page.transactions, alice[1..3]);
}

#[test]
fn unknown_paging_hash_is_rejected() {
    let (ledger, _, bob) = Ledger::alice_and_bob();

    let error = assert_error(
        ledger.run(
            "alice@wonderland",
            GetAccountTransactions::new(
                account("alice@wonderland"),
                TxPaginationMeta::new(5).after(bob[0].hash()),
            ),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
    assert_eq!(error.message, "invalid pagination hash");
}

#[test]
fn zero_matches_depend_on_the_account_existing() {
    let (ledger, _, _) = Ledger::alice_and_bob();

    let page = transactions_page(ledger.run(
        "auditor@wonderland",
        GetAccountTransactions::new(account("carol@wonderland"), TxPaginationMeta::new(5)),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.next_tx_hash, None);
    assert_eq!(page.all_transactions_size, 0);

    assert_error(
        ledger.run(
            "auditor@wonderland",
            GetAccountTransactions::new(account("ghost@wonderland"), TxPaginationMeta::new(5)),
        ),
        ErrorQueryType::NoAccount,
        error_code::INVALID_ACCOUNT_ID,
    );
}

#[test]
fn own_empty_history_is_an_empty_page() {
    let ledger = Ledger::new();

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), TxPaginationMeta::new(5)),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.next_tx_hash, None);
    assert_eq!(page.all_transactions_size, 0);
}

#[test]
fn denied_query_never_runs_its_read() {
    let ledger = Ledger::new();
    let executor = ledger.executor();
    let query = Query::GetPeers;
    let context = QueryContext::new(account("bob@wonderland"), &query);
    let reads = Cell::new(0_usize);
    let fallbacks = Cell::new(0_usize);

    let error = assert_error(
        executor.execute_query(
            &context,
            &PermissionCheck::any_of([RolePermission::GetPeers]),
            || {
                reads.set(reads.get() + 1);
                Ok(Vec::<u8>::new())
            },
            || {
                fallbacks.set(fallbacks.get() + 1);
                Ok(QueryFallbackCheckResult::Empty)
            },
            |_| Ok(QueryResponse::Peers(vec![])),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::NO_PERMISSIONS,
    );
    assert_eq!(error.message, "user must have at least one of the permissions: can_get_peers");
    assert_eq!((reads.get(), fallbacks.get()), (0, 0));
}

#[test]
fn denied_query_reads_no_blocks() {
    let (ledger, _, _) = Ledger::alice_and_bob();
    let blocks = CountingBlockSource::new(&ledger.store);
    let executor = QueryExecutor::new(ledger.index.connection(), &blocks, &ledger.pending);

    let error = assert_error(
        run(
            &executor,
            "bob@wonderland",
            GetAccountTransactions::new(account("alice@wonderland"), TxPaginationMeta::new(5)),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::NO_PERMISSIONS,
    );
    assert_eq!(
        error.message,
        "user must have at least one of the permissions: can_get_domain_acc_txs, can_get_all_acc_txs"
    );
    assert_error(
        run(&executor, "alice@wonderland", GetBlock::new(1)),
        ErrorQueryType::StatefulFailed,
        error_code::NO_PERMISSIONS,
    );
    assert_eq!(blocks.reads.get(), 0);
}

#[test]
fn corrupted_transaction_does_not_hide_its_siblings() {
    let mut ledger = Ledger::new();
    let good = [
        transfer("alice@wonderland", "bob@wonderland", 1),
        transfer("alice@wonderland", "bob@wonderland", 2),
    ];
    ledger.commit(vec![
        Entry::Transaction(good[0].clone()),
        Entry::Corrupted {
            creator: "alice@wonderland",
        },
        Entry::Transaction(good[1].clone()),
    ]);

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountTransactions::new(account("alice@wonderland"), TxPaginationMeta::new(10)),
    ));
    assert_eq!(page.transactions, good);
    assert_eq!(page.all_transactions_size, 3);
}

#[test]
fn account_asset_transactions_include_incoming_transfers() {
    let (ledger, alice, bob) = Ledger::alice_and_bob();

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountAssetTransactions::new(
            account("alice@wonderland"),
            asset("coin#wonderland"),
            TxPaginationMeta::new(3),
        ),
    ));
    assert_eq!(page.all_transactions_size, 9);
    assert_eq!(
        hashes(&page.transactions),
        hashes(&[alice[0].clone(), bob[0].clone(), alice[1].clone()])
    );
    assert_eq!(page.next_tx_hash, Some(alice[1].hash()));
}

#[test]
fn account_asset_transactions_of_missing_targets() {
    let (ledger, _, _) = Ledger::alice_and_bob();

    assert_error(
        ledger.run(
            "auditor@wonderland",
            GetAccountAssetTransactions::new(
                account("ghost@wonderland"),
                asset("coin#wonderland"),
                TxPaginationMeta::new(3),
            ),
        ),
        ErrorQueryType::NoAccount,
        error_code::INVALID_ACCOUNT_ID,
    );
    assert_error(
        ledger.run(
            "alice@wonderland",
            GetAccountAssetTransactions::new(
                account("alice@wonderland"),
                asset("gold#wonderland"),
                TxPaginationMeta::new(3),
            ),
        ),
        ErrorQueryType::NoAsset,
        error_code::INVALID_ASSET_ID,
    );

    let page = transactions_page(ledger.run(
        "alice@wonderland",
        GetAccountAssetTransactions::new(
            account("alice@wonderland"),
            asset("tea#wonderland"),
            TxPaginationMeta::new(3),
        ),
    ));
    assert!(page.transactions.is_empty());
    assert_eq!(page.all_transactions_size, 0);
}

#[test]
fn transactions_by_hash_keep_the_requested_order() {
    let (ledger, alice, bob) = Ledger::alice_and_bob();

    let response = ledger
        .run(
            "alice@wonderland",
            GetTransactions::new(vec![alice[4].hash(), alice[0].hash(), alice[3].hash()]),
        )
        .unwrap();
    assert_eq!(
        response,
        QueryResponse::Transactions(vec![alice[4].clone(), alice[0].clone(), alice[3].clone()])
    );

    let response = ledger
        .run(
            "auditor@wonderland",
            GetTransactions::new(vec![bob[1].hash(), alice[1].hash()]),
        )
        .unwrap();
    assert_eq!(
        response,
        QueryResponse::Transactions(vec![bob[1].clone(), alice[1].clone()])
    );
}

#[test]
fn transactions_by_hash_hide_foreign_and_unknown_transactions() {
    let (ledger, _, bob) = Ledger::alice_and_bob();

    assert_error(
        ledger.run("alice@wonderland", GetTransactions::new(vec![bob[0].hash()])),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
    let unknown = transfer("carol@wonderland", "bob@wonderland", 7).hash();
    assert_error(
        ledger.run("auditor@wonderland", GetTransactions::new(vec![unknown])),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
}

#[test]
fn blocks_are_addressed_from_one() {
    let (ledger, _, _) = Ledger::alice_and_bob();

    match ledger.run("auditor@wonderland", GetBlock::new(1)) {
        Ok(QueryResponse::Block(block)) => {
            assert_eq!(block.height(), 1);
            assert_eq!(block.transactions.len(), 4);
        }
        other => panic!("expected a block, got {other:?}"),
    }
    for height in [0, 3] {
        assert_error(
            ledger.run("auditor@wonderland", GetBlock::new(height)),
            ErrorQueryType::StatefulFailed,
            error_code::INVALID_HEIGHT,
        );
    }
}

#[test]
fn undecodable_block_is_an_internal_error() {
    let (ledger, _, _) = Ledger::alice_and_bob();
    let executor = QueryExecutor::with_decoder(
        ledger.index.connection(),
        &ledger.store,
        &ledger.pending,
        &FailingDecoder,
    );

    assert_error(
        run(&executor, "auditor@wonderland", GetBlock::new(2)),
        ErrorQueryType::StatefulFailed,
        error_code::INTERNAL,
    );
    assert_error(
        run(
            &executor,
            "alice@wonderland",
            GetAccountTransactions::new(account("alice@wonderland"), TxPaginationMeta::new(5)),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::INTERNAL,
    );
}

/// Block source whose tip is ahead of the blocks it can serve.
struct TruncatedBlockSource;

impl BlockSource for TruncatedBlockSource {
    fn height(&self) -> Result<u64, kura::Error> {
        Ok(2)
    }

    fn read(&self, _height: u64) -> Result<Option<Vec<u8>>, kura::Error> {
        Ok(None)
    }
}

#[test]
fn block_missing_below_the_tip_is_an_internal_error() {
    let ledger = Ledger::new();
    let executor = QueryExecutor::new(ledger.index.connection(), &TruncatedBlockSource, &ledger.pending);

    let error = assert_error(
        run(&executor, "auditor@wonderland", GetBlock::new(2)),
        ErrorQueryType::StatefulFailed,
        error_code::INTERNAL,
    );
    assert_eq!(error.message, "Block 2 is indexed but missing from the block store");
}

#[test]
fn account_with_roles() {
    let ledger = Ledger::new();

    match ledger.run("alice@wonderland", GetAccount::new(account("alice@wonderland"))) {
        Ok(QueryResponse::Account(response)) => {
            assert_eq!(response.account.id(), &account("alice@wonderland"));
            assert_eq!(*response.account.quorum(), 1);
            assert_eq!(
                response.account.detail()[&account("bob@wonderland")]["city"],
                "Kyoto"
            );
            assert_eq!(response.roles, vec!["user".parse::<RoleId>().unwrap()]);
        }
        other => panic!("expected an account, got {other:?}"),
    }

    assert_error(
        ledger.run("auditor@wonderland", GetAccount::new(account("ghost@wonderland"))),
        ErrorQueryType::NoAccount,
        error_code::NOT_FOUND,
    );
}

#[test]
fn root_grants_every_query() {
    let ledger = Ledger::new();

    assert!(ledger
        .run("admin@wonderland", GetAccount::new(account("alice@wonderland")))
        .is_ok());
    assert!(ledger.run("admin@wonderland", Query::GetRoles).is_ok());
}

#[test]
fn signatories_report_why_there_are_none() {
    let ledger = Ledger::new();

    assert_eq!(
        ledger
            .run("alice@wonderland", GetSignatories::new(account("alice@wonderland")))
            .unwrap(),
        QueryResponse::Signatories(vec!["0a11ce".parse().unwrap(), "a11ce0".parse().unwrap()])
    );

    let error = assert_error(
        ledger.run("auditor@wonderland", GetSignatories::new(account("carol@wonderland"))),
        ErrorQueryType::NoSignatories,
        error_code::NOT_FOUND,
    );
    assert!(error.message.contains("has no signatories"));

    let error = assert_error(
        ledger.run("auditor@wonderland", GetSignatories::new(account("ghost@wonderland"))),
        ErrorQueryType::NoSignatories,
        error_code::NOT_FOUND,
    );
    assert!(error.message.contains("no account"));
}

#[test]
fn account_assets_are_paged_by_first_asset() {
    let ledger = Ledger::new();
    let query = |first_asset_id: Option<&str>| {
        GetAccountAssets::new(
            account("alice@wonderland"),
            Some(AssetPaginationMeta::new(1, first_asset_id.map(asset))),
        )
    };

    let Ok(QueryResponse::AccountAssets(first)) = ledger.run("alice@wonderland", query(None)) else {
        panic!("expected account assets");
    };
    assert_eq!(first.assets.len(), 1);
    assert_eq!(first.assets[0].asset_id(), &asset("coin#wonderland"));
    assert_eq!(first.assets[0].balance(), "10.00");
    assert_eq!(first.total_number, 2);
    assert_eq!(first.next_asset_id, Some(asset("tea#wonderland")));

    let Ok(QueryResponse::AccountAssets(last)) =
        ledger.run("alice@wonderland", query(Some("tea#wonderland")))
    else {
        panic!("expected account assets");
    };
    assert_eq!(last.assets[0].asset_id(), &asset("tea#wonderland"));
    assert_eq!(last.next_asset_id, None);

    assert_error(
        ledger.run("alice@wonderland", query(Some("gold#wonderland"))),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
}

#[test]
fn account_assets_of_empty_and_missing_accounts() {
    let ledger = Ledger::new();

    let Ok(QueryResponse::AccountAssets(empty)) = ledger.run(
        "auditor@wonderland",
        GetAccountAssets::new(account("carol@wonderland"), None),
    ) else {
        panic!("expected account assets");
    };
    assert!(empty.assets.is_empty());
    assert_eq!(empty.total_number, 0);

    assert_error(
        ledger.run(
            "auditor@wonderland",
            GetAccountAssets::new(account("ghost@wonderland"), None),
        ),
        ErrorQueryType::NoAccountAssets,
        error_code::NOT_FOUND,
    );
}

#[test]
fn missing_account_outranks_unknown_first_asset() {
    let ledger = Ledger::new();
    let query = |account_id: &str| {
        GetAccountAssets::new(
            account(account_id),
            Some(AssetPaginationMeta::new(2, Some(asset("coin#wonderland")))),
        )
    };

    let error = assert_error(
        ledger.run("auditor@wonderland", query("ghost@wonderland")),
        ErrorQueryType::NoAccountAssets,
        error_code::NOT_FOUND,
    );
    assert_eq!(error.message, "no account with such id found: ghost@wonderland");

    assert_error(
        ledger.run("auditor@wonderland", query("carol@wonderland")),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
}

#[test]
fn account_detail_filters_and_pages_records() {
    let ledger = Ledger::new();
    let alice = account("alice@wonderland");

    let Ok(QueryResponse::AccountDetail(all_ages)) = ledger.run(
        "alice@wonderland",
        GetAccountDetail::new(alice.clone(), None, Some("age".to_owned()), None),
    ) else {
        panic!("expected account detail");
    };
    assert_eq!(
        all_ages.detail,
        r#"{"alice@wonderland":{"age":"31"},"bob@wonderland":{"age":"30"}}"#
    );
    assert_eq!(all_ages.total_number, 2);

    let Ok(QueryResponse::AccountDetail(first)) = ledger.run(
        "alice@wonderland",
        GetAccountDetail::new(
            alice.clone(),
            None,
            None,
            Some(AccountDetailPaginationMeta::new(2, None)),
        ),
    ) else {
        panic!("expected account detail");
    };
    assert_eq!(
        first.detail,
        r#"{"alice@wonderland":{"age":"31"},"bob@wonderland":{"age":"30"}}"#
    );
    assert_eq!(first.total_number, 3);
    let next = AccountDetailRecordId::new(account("bob@wonderland"), "city".to_owned());
    assert_eq!(first.next_record_id, Some(next.clone()));

    let Ok(QueryResponse::AccountDetail(last)) = ledger.run(
        "alice@wonderland",
        GetAccountDetail::new(
            alice.clone(),
            None,
            None,
            Some(AccountDetailPaginationMeta::new(2, Some(next))),
        ),
    ) else {
        panic!("expected account detail");
    };
    assert_eq!(last.detail, r#"{"bob@wonderland":{"city":"Kyoto"}}"#);
    assert_eq!(last.next_record_id, None);

    let Ok(QueryResponse::AccountDetail(nothing)) = ledger.run(
        "alice@wonderland",
        GetAccountDetail::new(alice, Some(account("carol@wonderland")), None, None),
    ) else {
        panic!("expected account detail");
    };
    assert_eq!(nothing.detail, "{}");
    assert_eq!(nothing.total_number, 0);
}

#[test]
fn account_detail_of_missing_account() {
    let ledger = Ledger::new();

    assert_error(
        ledger.run(
            "auditor@wonderland",
            GetAccountDetail::new(account("ghost@wonderland"), None, None, None),
        ),
        ErrorQueryType::NoAccountDetail,
        error_code::NOT_FOUND,
    );
    assert_error(
        ledger.run(
            "alice@wonderland",
            GetAccountDetail::new(
                account("alice@wonderland"),
                None,
                None,
                Some(AccountDetailPaginationMeta::new(
                    2,
                    Some(AccountDetailRecordId::new(account("carol@wonderland"), "age".to_owned())),
                )),
            ),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
}

#[test]
fn roles_and_their_permissions() {
    let ledger = Ledger::new();

    assert_eq!(
        ledger.run("auditor@wonderland", Query::GetRoles).unwrap(),
        QueryResponse::Roles(vec![
            "admin".parse().unwrap(),
            "auditor".parse().unwrap(),
            "user".parse().unwrap(),
        ])
    );
    assert_eq!(
        ledger
            .run("auditor@wonderland", GetRolePermissions::new("admin".parse().unwrap()))
            .unwrap(),
        QueryResponse::RolePermissions([RolePermission::Root].into_iter().collect())
    );
    assert_error(
        ledger.run("auditor@wonderland", GetRolePermissions::new("ghost".parse().unwrap())),
        ErrorQueryType::NoRoles,
        error_code::NOT_FOUND,
    );
    assert_error(
        ledger.run("alice@wonderland", Query::GetRoles),
        ErrorQueryType::StatefulFailed,
        error_code::NO_PERMISSIONS,
    );
}

#[test]
fn asset_info() {
    let ledger = Ledger::new();

    match ledger.run("auditor@wonderland", GetAssetInfo::new(asset("coin#wonderland"))) {
        Ok(QueryResponse::AssetInfo(info)) => {
            assert_eq!(info.id(), &asset("coin#wonderland"));
            assert_eq!(info.precision(), 2);
        }
        other => panic!("expected asset info, got {other:?}"),
    }
    assert_error(
        ledger.run("auditor@wonderland", GetAssetInfo::new(asset("gold#wonderland"))),
        ErrorQueryType::NoAsset,
        error_code::NOT_FOUND,
    );
}

#[test]
fn empty_peer_list_is_a_success() {
    let ledger = Ledger::new();

    assert_eq!(
        ledger.run("auditor@wonderland", Query::GetPeers).unwrap(),
        QueryResponse::Peers(vec![])
    );

    ledger
        .index
        .connection()
        .execute(
            "INSERT INTO peer (public_key, address, tls_certificate) VALUES ('ee', '127.0.0.1:10001', NULL)",
            [],
        )
        .unwrap();
    let Ok(QueryResponse::Peers(peers)) = ledger.run("auditor@wonderland", Query::GetPeers) else {
        panic!("expected peers");
    };
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].address(), "127.0.0.1:10001");
    assert_eq!(peers[0].tls_certificate(), &None);
}

#[test]
fn pending_transactions_of_the_author() {
    let ledger = Ledger::new();
    let pending: Vec<_> = (0..3)
        .map(|i| transfer("alice@wonderland", "bob@wonderland", 500 + i))
        .collect();
    ledger.pending.insert_batch(pending.clone());

    assert_eq!(
        ledger
            .run("alice@wonderland", GetPendingTransactions::new(None))
            .unwrap(),
        QueryResponse::Transactions(pending.clone())
    );
    assert_eq!(
        ledger.run("carol@wonderland", GetPendingTransactions::new(None)).unwrap(),
        QueryResponse::Transactions(vec![])
    );

    let page = |pagination| {
        match ledger.run("alice@wonderland", GetPendingTransactions::new(Some(pagination))) {
            Ok(QueryResponse::PendingTransactionsPage(page)) => page,
            other => panic!("expected a pending page, got {other:?}"),
        }
    };
    let first = page(PendingTxPaginationMeta::new(2, None));
    assert_eq!(first.transactions, pending[..2]);
    assert_eq!(first.next_tx_hash, Some(pending[1].hash()));
    assert_eq!(first.all_transactions_size, 3);

    let last = page(PendingTxPaginationMeta::new(2, Some(pending[1].hash())));
    assert_eq!(last.transactions, pending[2..]);
    assert_eq!(last.next_tx_hash, None);

    let unknown = transfer("carol@wonderland", "bob@wonderland", 0).hash();
    assert_error(
        ledger.run(
            "alice@wonderland",
            GetPendingTransactions::new(Some(PendingTxPaginationMeta::new(2, Some(unknown)))),
        ),
        ErrorQueryType::StatefulFailed,
        error_code::INVALID_PAGINATION,
    );
}

#[test]
fn pending_storage_is_read_once_per_query() {
    let ledger = Ledger::new();
    let pending = CountingPendingStorage::default();
    let executor = QueryExecutor::new(ledger.index.connection(), &ledger.store, &pending);

    run(&executor, "alice@wonderland", GetPendingTransactions::new(None)).unwrap();
    assert_eq!(pending.reads.load(Ordering::SeqCst), 1);
}

#[test]
fn storage_fault_is_an_internal_error() {
    let ledger = Ledger::new();
    ledger
        .index
        .connection()
        .execute("DROP TABLE peer", [])
        .unwrap();

    assert_error(
        ledger.run("auditor@wonderland", Query::GetPeers),
        ErrorQueryType::StatefulFailed,
        error_code::INTERNAL,
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn full_traversal_visits_every_transaction_once(page_size in 1_u32..10, descending in any::<bool>()) {
        let (ledger, mut alice, _) = Ledger::alice_and_bob();
        let ordering = if descending {
            alice.reverse();
            TxOrdering::Descending
        } else {
            TxOrdering::Ascending
        };

        let mut seen = Vec::new();
        let mut pagination = TxPaginationMeta::new(page_size).ordered(ordering);
        loop {
            let page = transactions_page(ledger.run(
                "alice@wonderland",
                GetAccountTransactions::new(account("alice@wonderland"), pagination.clone()),
            ));
            prop_assert!(page.transactions.len() <= page_size as usize);
            seen.extend(page.transactions);
            match page.next_tx_hash {
                Some(next) => pagination = pagination.after(next),
                None => break,
            }
        }
        prop_assert_eq!(seen, alice);
    }
}
