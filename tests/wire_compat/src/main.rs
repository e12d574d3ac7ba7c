fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use appbits_app_files::KnownResources;
    use appbits_resources::{
        AppFileResource, IntegrityFields, LocalFileRecord, RemoteFileDescriptor,
        UploadFileDescriptor,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  Rust: {reserialized}"
        );
        parsed
    }

    // --- Resource-match payloads ---

    #[test]
    fn fixture_app_file_resource() {
        let resource: AppFileResource = roundtrip_test("app_file_resource.json");
        assert_eq!(resource.path, "bin/start");
        assert_eq!(resource.mode, "0100755");
    }

    #[test]
    fn fixture_app_file_resources() {
        let resources: Vec<AppFileResource> = roundtrip_test("app_file_resources.json");
        assert_eq!(resources.len(), 2);
        assert!(resources[0].mode.is_empty());
    }

    #[test]
    fn fixture_integrity_fields() {
        let fields: IntegrityFields = roundtrip_test("integrity_fields.json");
        assert_eq!(fields.size, 11);
    }

    #[test]
    fn integrity_fields_match_resource_subset() {
        let resource: AppFileResource =
            serde_json::from_value(load_fixture("app_file_resource.json")).unwrap();
        let fields: IntegrityFields =
            serde_json::from_value(load_fixture("integrity_fields.json")).unwrap();
        assert_eq!(resource.to_integrity_fields(), fields);
    }

    // --- Gather-side records ---

    #[test]
    fn fixture_local_file_record() {
        let record: LocalFileRecord = roundtrip_test("local_file_record.json");
        assert!(record.has_digest());
    }

    #[test]
    fn fixture_remote_file_descriptor() {
        let remote: RemoteFileDescriptor = roundtrip_test("remote_file_descriptor.json");
        assert_eq!(remote.mode.as_deref(), Some("0100644"));
    }

    #[test]
    fn fixture_upload_file_descriptor() {
        let upload: UploadFileDescriptor = roundtrip_test("upload_file_descriptor.json");
        assert_eq!(upload.mode, "0120777");
        assert_eq!(upload.size, Some(7));
    }

    #[test]
    fn known_resources_file_shape() {
        let known = KnownResources::load(&fixtures_dir().join("app_file_resources.json"))
            .expect("known resources fixture should load");
        assert_eq!(known.len(), 2);

        let local = [LocalFileRecord::with_digest(
            "renamed/user.rb",
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed",
            11,
        )];
        let matched = known.matching(&local);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].path, "renamed/user.rb");
    }
}
