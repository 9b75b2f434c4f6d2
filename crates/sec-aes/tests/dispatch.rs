//! End-to-end scenarios through the dispatcher.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sec_aes::{AesBackend, Error, LegacyBackend, SecAes, StandardBackend, Version, BLOCK_SIZE};

const AES256_ZERO: &str = "dc95c078a2408989ad48a21492842087";
const AES128_ZERO: &str = "66e94bd4ef8a2c3b884cfa59ca342b2e";

#[test]
fn encrypt_before_key_fails_cleanly() {
    let mut aes = SecAes::new();
    let mut out = [0x33u8; 16];
    assert_eq!(aes.encrypt(&[0u8; 16], &mut out), Err(Error::NotInitialized));
    assert_eq!(out, [0x33u8; 16]);
}

#[test]
fn legacy_zero_key_conformance() {
    let mut aes = SecAes::new();
    aes.init_key(&[0u8; 32], Version::Legacy).expect("valid key");
    let mut out = [0u8; 16];
    aes.encrypt(&[0u8; 16], &mut out).expect("aligned");
    assert_eq!(hex::encode(out), AES256_ZERO);
}

#[test]
fn legacy_multi_block_is_unchained() {
    let mut aes = SecAes::new();
    aes.init_key_with_selector(&[0u8; 16], Version::Legacy.selector())
        .expect("valid key");
    let mut out = [0u8; 48];
    aes.encrypt(&[0u8; 48], &mut out).expect("aligned");
    let expected = AES128_ZERO.repeat(3);
    assert_eq!(hex::encode(out), expected);
}

#[test]
fn length_checks_apply_to_both_versions() {
    for version in [Version::Legacy, Version::StandardOperation] {
        let mut aes = SecAes::new();
        aes.init_key(&[1u8; 24], version).expect("valid key");
        let mut short = [0u8; 16];
        assert_eq!(
            aes.encrypt(&[0u8; 32], &mut short),
            Err(Error::LengthMismatch {
                input: 32,
                output: 16
            })
        );
        let mut odd = [0u8; 17];
        assert_eq!(
            aes.decrypt(&[0u8; 17], &mut odd),
            Err(Error::InvalidBlockAlignment { len: 17 })
        );
    }
}

#[test]
fn versions_are_interchangeable() {
    let mut rng = ChaCha20Rng::from_seed([21u8; 32]);
    for len in [16usize, 24, 32] {
        let mut key = vec![0u8; len];
        let mut plain = vec![0u8; 8 * BLOCK_SIZE];
        rng.fill_bytes(&mut key);
        rng.fill_bytes(&mut plain);

        let mut aes = SecAes::new();
        let mut legacy_ct = vec![0u8; plain.len()];
        aes.init_key(&key, Version::Legacy).expect("valid key");
        aes.encrypt(&plain, &mut legacy_ct).expect("aligned");

        let mut so_ct = vec![0u8; plain.len()];
        aes.init_key(&key, Version::StandardOperation)
            .expect("valid key");
        aes.encrypt(&plain, &mut so_ct).expect("aligned");
        assert_eq!(legacy_ct, so_ct);

        // Decrypt the SO ciphertext with the legacy backend, still keyed.
        aes.init_vector(Version::Legacy).expect("re-arm");
        let mut back = vec![0u8; plain.len()];
        aes.decrypt(&so_ct, &mut back).expect("aligned");
        assert_eq!(back, plain);
    }
}

#[test]
fn rekey_replaces_previous_key() {
    let mut aes = SecAes::new();
    aes.init_key(&[0u8; 32], Version::Legacy).expect("valid key");
    aes.init_key(&[0u8; 16], Version::Legacy).expect("valid key");
    let mut out = [0u8; 16];
    aes.encrypt(&[0u8; 16], &mut out).expect("aligned");
    assert_eq!(hex::encode(out), AES128_ZERO);
}

#[test]
fn backends_work_as_trait_objects() {
    let mut backends: Vec<Box<dyn AesBackend>> =
        vec![Box::new(LegacyBackend::new()), Box::new(StandardBackend::new())];
    for backend in backends.iter_mut() {
        backend.init_key(&[0u8; 32]).expect("valid key");
        let mut out = [0u8; 16];
        backend.encrypt(&[0u8; 16], &mut out).expect("aligned");
        assert_eq!(hex::encode(out), AES256_ZERO, "{}", backend.version());
    }
}
