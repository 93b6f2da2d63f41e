use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use num::BigUint;
use std::str::FromStr;
use zklink_crypto::ZkLinkSigner;
use zklink_types::{
    AccountId, Nonce, SubAccountId, TimeStamp, TokenId, Transfer, TransferBuilder, TxBytes,
    ZkLinkAddress, ZkSignatureTx,
};

lazy_static! {
    static ref SIGNER: ZkLinkSigner = ZkLinkSigner::new_from_seed(&[7u8; 32]).unwrap();
    static ref TRANSFER: Transfer = TransferBuilder {
        account_id: AccountId(10),
        to_address: ZkLinkAddress::from_str("0xAFAFf3aD1a0425D792432D9eCD1c3e26Ef2C42E9").unwrap(),
        from_sub_account_id: SubAccountId(1),
        to_sub_account_id: SubAccountId(1),
        token: TokenId(18),
        amount: BigUint::from(10000u32),
        fee: BigUint::from(3u32),
        nonce: Nonce(1),
        ts: Some(TimeStamp(1693472232)),
    }
    .build()
    .unwrap();
}

fn bench_transfer_get_bytes(c: &mut Criterion) {
    c.bench_function("transfer get_bytes", |b| {
        b.iter(|| black_box(&*TRANSFER).get_bytes())
    });
}

fn bench_transfer_sign(c: &mut Criterion) {
    c.bench_function("transfer sign", |b| {
        b.iter(|| black_box(TRANSFER.clone()).sign(&SIGNER).unwrap())
    });
}

fn bench_transfer_verify(c: &mut Criterion) {
    let signed = TRANSFER.clone().sign(&SIGNER).unwrap();
    c.bench_function("transfer is_signature_valid", |b| {
        b.iter(|| black_box(&signed).is_signature_valid())
    });
}

criterion_group!(
    benches,
    bench_transfer_get_bytes,
    bench_transfer_sign,
    bench_transfer_verify
);
criterion_main!(benches);
