//! Storing, appending and loading files through the public API.

use proptest::prelude::*;
use strongbox::{ErrorKind, VaultConfig};
use strongbox_testkit::{content_parts, filename, username, TestFixture};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn login_recovers_files() -> anyhow::Result<()> {
    init_tracing();
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");
    alice.store_file("notes.txt", b"remember the milk")?;
    drop(alice);

    let alice = fixture.login("alice");
    assert_eq!(alice.load_file("notes.txt")?, b"remember the milk");
    Ok(())
}

#[test]
fn appends_load_in_order() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");

    alice.store_file("log", b"A")?;
    alice.append_to_file("log", b"B")?;
    alice.append_to_file("log", b"")?;
    alice.append_to_file("log", b"C")?;

    assert_eq!(alice.load_file("log")?, b"ABC");
    Ok(())
}

#[test]
fn store_overwrites_content() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");

    alice.store_file("f", b"first version")?;
    alice.append_to_file("f", b" with more")?;
    alice.store_file("f", b"second")?;

    assert_eq!(alice.load_file("f")?, b"second");
    Ok(())
}

#[test]
fn empty_file_and_empty_name() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");

    alice.store_file("", b"")?;
    assert_eq!(alice.load_file("")?, b"");
    alice.append_to_file("", b"x")?;
    assert_eq!(alice.load_file("")?, b"x");
    Ok(())
}

#[test]
fn missing_file_is_not_found() {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");

    assert_eq!(alice.load_file("nope").unwrap_err().kind(), ErrorKind::NotFound);
    assert_eq!(
        alice.append_to_file("nope", b"x").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn namespaces_are_per_user() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");
    let bob = fixture.user("bob");

    alice.store_file("same-name", b"alice's")?;
    bob.store_file("same-name", b"bob's")?;

    assert_eq!(alice.load_file("same-name")?, b"alice's");
    assert_eq!(bob.load_file("same-name")?, b"bob's");
    Ok(())
}

#[test]
fn sessions_of_one_user_see_each_other() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let laptop = fixture.user("alice");
    let phone = fixture.login("alice");

    laptop.store_file("shared", b"from laptop")?;
    phone.append_to_file("shared", b", from phone")?;

    assert_eq!(laptop.load_file("shared")?, b"from laptop, from phone");
    assert_eq!(phone.load_file("shared")?, b"from laptop, from phone");
    Ok(())
}

#[test]
fn append_cost_independent_of_file_size() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");

    alice.store_file("small", b"s")?;
    alice.store_file("large", &vec![0xAB; 64 * 1024])?;
    for _ in 0..50 {
        alice.append_to_file("large", &[0xCD; 1024])?;
    }

    let store = fixture.store();
    let mut costs = Vec::new();
    for (name, len) in [("small", 100), ("large", 100), ("small", 4096), ("large", 4096)] {
        store.reset_stats();
        alice.append_to_file(name, &vec![7u8; len])?;
        costs.push(store.bytes_written());
    }

    assert_eq!(costs[0], costs[1]);
    assert_eq!(costs[2], costs[3]);
    assert!(costs[2] - costs[0] >= 3996);
    assert!(costs[0] < 100 + 512, "append overhead too large: {}", costs[0]);
    Ok(())
}

#[test]
fn append_writes_two_blobs() -> anyhow::Result<()> {
    let fixture = TestFixture::new();
    let alice = fixture.user("alice");
    alice.store_file("f", b"start")?;

    fixture.store().reset_stats();
    alice.append_to_file("f", b"more")?;

    assert_eq!(fixture.store().put_count(), 2);
    assert_eq!(fixture.store().delete_count(), 0);
    Ok(())
}

#[test]
fn prune_config_does_not_affect_files() -> anyhow::Result<()> {
    let fixture = TestFixture::with_config(VaultConfig {
        prune_revoked_grants: true,
        ..VaultConfig::default()
    });
    let alice = fixture.user("alice");
    alice.store_file("f", b"x")?;
    assert_eq!(alice.load_file("f")?, b"x");
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn load_returns_concatenation(
        user in username(),
        name in filename(),
        parts in content_parts(6, 256),
    ) {
        let fixture = TestFixture::new();
        let session = fixture.user(&user);

        session.store_file(&name, &parts[0]).unwrap();
        for part in &parts[1..] {
            session.append_to_file(&name, part).unwrap();
        }

        prop_assert_eq!(session.load_file(&name).unwrap(), parts.concat());
        prop_assert_eq!(fixture.login(&user).load_file(&name).unwrap(), parts.concat());
    }
}
