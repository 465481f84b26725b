//! Tests for update request synthesis over typed request shapes.

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::update::{changed_fields, is_zero_values, patch_payload, PatchOptions};
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ClusterDescription {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        backup_enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        labels: Option<Vec<ComponentLabel>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        replication_specs: Option<Vec<ReplicationSpec>>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct ComponentLabel {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ReplicationSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        zone_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        zone_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        region_configs: Option<Vec<CloudRegionConfig>>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CloudRegionConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        electable_specs: Option<HardwareSpec>,
        #[serde(skip_serializing_if = "Option::is_none")]
        read_only_specs: Option<HardwareSpec>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct HardwareSpec {
        #[serde(skip_serializing_if = "Option::is_none")]
        node_count: Option<i64>,
        #[serde(rename = "diskSizeGB", skip_serializing_if = "Option::is_none")]
        disk_size_gb: Option<f64>,
        #[serde(rename = "diskIOPS", skip_serializing_if = "Option::is_none")]
        disk_iops: Option<i64>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ProcessArgs {
        #[serde(skip_serializing_if = "Option::is_none")]
        javascript_enabled: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        no_table_scan: Option<bool>,
    }

    /// A fully populated spec, as the server reports it.
    fn placeholder(index: usize) -> ReplicationSpec {
        ReplicationSpec {
            id: Some(format!("replicationSpec{}_id", index)),
            zone_id: Some(format!("replicationSpec{}_zoneId", index)),
            zone_name: Some(format!("replicationSpec{}_zoneName", index)),
            region_configs: None,
        }
    }

    /// A spec as a user writes it: only the zone name.
    fn zone(name: &str) -> ReplicationSpec {
        ReplicationSpec {
            zone_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn with_specs(specs: Vec<ReplicationSpec>) -> ClusterDescription {
        ClusterDescription {
            replication_specs: Some(specs),
            ..Default::default()
        }
    }

    fn state() -> ClusterDescription {
        ClusterDescription {
            id: Some("id_root".into()),
            name: Some("my-cluster".into()),
            replication_specs: Some(vec![placeholder(1)]),
            ..Default::default()
        }
    }

    fn plan_no_changes() -> ClusterDescription {
        with_specs(vec![zone("replicationSpec1_zoneName")])
    }

    fn disk_cluster(
        electable_disk_gb: f64,
        read_only_disk_gb: Option<f64>,
        disk_iops: Option<i64>,
    ) -> ClusterDescription {
        with_specs(vec![ReplicationSpec {
            region_configs: Some(vec![CloudRegionConfig {
                electable_specs: Some(HardwareSpec {
                    node_count: Some(3),
                    disk_size_gb: Some(electable_disk_gb),
                    disk_iops,
                }),
                read_only_specs: Some(HardwareSpec {
                    node_count: Some(0),
                    disk_size_gb: read_only_disk_gb,
                    disk_iops,
                }),
                ..Default::default()
            }]),
            ..Default::default()
        }])
    }

    fn patch<T>(state: &T, plan: &T, options: &PatchOptions) -> Option<T>
    where
        T: Serialize + serde::de::DeserializeOwned + Default,
    {
        patch_payload(Some(state), Some(plan), options).unwrap()
    }

    #[test]
    fn test_computed_values_from_state_are_added_to_changed_element() {
        let spec1 = placeholder(1);
        let expected = with_specs(vec![ReplicationSpec {
            id: spec1.id.clone(),
            zone_id: spec1.zone_id.clone(),
            zone_name: Some("newName".into()),
            region_configs: None,
        }]);
        assert_eq!(
            patch(&state(), &with_specs(vec![zone("newName")]), &PatchOptions::new()),
            Some(expected)
        );
    }

    #[test]
    fn test_new_list_entry_is_included() {
        let plan = with_specs(vec![placeholder(1), zone("zone2")]);
        assert_eq!(
            patch(&state(), &plan, &PatchOptions::new()),
            Some(with_specs(vec![placeholder(1), zone("zone2")]))
        );
    }

    #[test]
    fn test_removed_list_entry_is_detected() {
        let state = with_specs(vec![placeholder(1), placeholder(2)]);
        let plan = with_specs(vec![placeholder(1)]);
        assert_eq!(
            patch(&state, &plan, &PatchOptions::new()),
            Some(with_specs(vec![placeholder(1)]))
        );
    }

    #[test]
    fn test_added_list_entry_in_the_middle_is_detected() {
        let state = with_specs(vec![placeholder(1), placeholder(2)]);
        let plan = with_specs(vec![placeholder(1), placeholder(3), placeholder(2)]);
        assert_eq!(patch(&state, &plan, &PatchOptions::new()), Some(plan));
    }

    #[test]
    fn test_removed_list_entry_in_the_middle_is_detected() {
        let state = with_specs(vec![placeholder(1), placeholder(2), placeholder(3)]);
        let plan = with_specs(vec![placeholder(1), placeholder(3)]);
        assert_eq!(patch(&state, &plan, &PatchOptions::new()), Some(plan));
    }

    #[test]
    fn test_region_config_changes_are_included() {
        let region = |priority| CloudRegionConfig {
            priority: Some(priority),
            ..Default::default()
        };
        let spec = |regions| ReplicationSpec {
            id: Some("replicationSpec1_id".into()),
            region_configs: Some(regions),
            ..Default::default()
        };
        let state = with_specs(vec![spec(vec![region(1)])]);
        let plan = with_specs(vec![spec(vec![region(1), region(2)])]);
        assert_eq!(patch(&state, &plan, &PatchOptions::new()), Some(plan));
    }

    #[test]
    fn test_name_change_and_backup_enabled_added() {
        let plan = ClusterDescription {
            name: Some("my-cluster-updated".into()),
            backup_enabled: Some(true),
            ..Default::default()
        };
        assert_eq!(
            patch(&state(), &plan, &PatchOptions::new()),
            Some(plan.clone())
        );
    }

    #[test]
    fn test_no_changes_when_only_computed_attributes_are_missing_from_plan() {
        assert_eq!(
            patch(&state(), &plan_no_changes(), &PatchOptions::new()),
            None
        );
    }

    #[test]
    fn test_forced_changes_restore_state_values() {
        let options = PatchOptions::new().with_force_update_attr(["replicationSpecs"]);
        assert_eq!(
            patch(&state(), &plan_no_changes(), &options),
            Some(with_specs(vec![placeholder(1)]))
        );
    }

    #[test]
    fn test_forced_changes_when_state_equals_plan() {
        let options = PatchOptions::new().with_force_update_attr(["replicationSpecs"]);
        assert_eq!(
            patch(&state(), &state(), &options),
            Some(with_specs(vec![placeholder(1)]))
        );
        let changed = changed_fields(
            &Value::from_serialize(&state()).unwrap(),
            &Value::from_serialize(&state()).unwrap(),
            &options,
        );
        assert!(changed.contains("replicationSpecs"));
        assert_eq!(changed.len(), 1);
    }

    #[test]
    fn test_empty_array_returns_no_changes() {
        let doc = ClusterDescription {
            labels: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(patch(&doc, &doc.clone(), &PatchOptions::new()), None);
    }

    #[test]
    fn test_disk_size_ignored_in_state() {
        let options = PatchOptions::new().with_ignore_in_state_suffix(["diskSizeGB"]);
        assert_eq!(
            patch(
                &disk_cluster(50.0, Some(50.0), Some(3500)),
                &disk_cluster(55.0, None, None),
                &options
            ),
            Some(disk_cluster(55.0, None, Some(3500)))
        );
    }

    #[test]
    fn test_region_configs_ignored_in_state_but_disk_iops_included() {
        let options = PatchOptions::new()
            .with_ignore_in_state_prefix(["regionConfigs"])
            .with_include_in_state_suffix(["diskIOPS"]);
        assert_eq!(
            patch(
                &disk_cluster(50.0, Some(50.0), Some(3500)),
                &disk_cluster(55.0, None, None),
                &options
            ),
            Some(disk_cluster(55.0, None, Some(3500)))
        );
    }

    #[test]
    fn test_without_ignore_rules_every_state_value_returns() {
        assert_eq!(
            patch(
                &disk_cluster(50.0, Some(50.0), Some(3500)),
                &disk_cluster(55.0, None, None),
                &PatchOptions::new()
            ),
            Some(disk_cluster(55.0, Some(50.0), Some(3500)))
        );
    }

    #[test]
    fn test_nested_list_element_removal_is_not_reinjected() {
        let state = with_specs(vec![ReplicationSpec {
            region_configs: Some(vec![
                CloudRegionConfig {
                    priority: Some(1),
                    electable_specs: Some(HardwareSpec {
                        disk_iops: Some(3500),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                CloudRegionConfig {
                    priority: Some(2),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        }]);
        let plan = with_specs(vec![ReplicationSpec {
            region_configs: Some(vec![CloudRegionConfig {
                priority: Some(1),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let mut expected = state.clone();
        if let Some(specs) = expected.replication_specs.as_mut() {
            if let Some(regions) = specs[0].region_configs.as_mut() {
                regions.truncate(1);
            }
        }
        assert_eq!(patch(&state, &plan, &PatchOptions::new()), Some(expected));
    }

    #[test]
    fn test_idempotent_for_every_fixture() {
        let fixtures = vec![
            ClusterDescription::default(),
            state(),
            plan_no_changes(),
            disk_cluster(10.0, Some(10.0), Some(100)),
            with_specs(vec![placeholder(1), placeholder(2), zone("z")]),
        ];
        for fixture in fixtures {
            assert_eq!(patch(&fixture, &fixture, &PatchOptions::new()), None, "{:?}", fixture);
        }
    }

    #[test]
    fn test_missing_state_diffs_against_zero_value() {
        let plan = with_specs(vec![zone("zone1")]);
        assert_eq!(
            patch_payload(None, Some(&plan), &PatchOptions::new()).unwrap(),
            Some(plan.clone())
        );
    }

    #[test]
    fn test_advanced_config() {
        let state = ProcessArgs {
            javascript_enabled: Some(true),
            ..Default::default()
        };
        let cases = vec![
            (
                "javascript disabled",
                ProcessArgs {
                    javascript_enabled: Some(false),
                    ..Default::default()
                },
                Some(ProcessArgs {
                    javascript_enabled: Some(false),
                    ..Default::default()
                }),
            ),
            ("javascript set to null", ProcessArgs::default(), None),
            ("state equals plan", state.clone(), None),
            (
                "adding no table scan leaves javascript out",
                ProcessArgs {
                    no_table_scan: Some(true),
                    ..Default::default()
                },
                Some(ProcessArgs {
                    no_table_scan: Some(true),
                    ..Default::default()
                }),
            ),
        ];
        for (name, plan, expected) in cases {
            assert_eq!(patch(&state, &plan, &PatchOptions::new()), expected, "case: {}", name);
        }
        assert_eq!(
            patch_payload(Some(&state), None, &PatchOptions::new()).unwrap(),
            None
        );
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct SearchIndex {
        name: String,
        analyzer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<i64>,
    }

    #[test]
    fn test_required_fields_outside_the_patch_keep_zero_values() {
        let state = SearchIndex {
            name: "idx".into(),
            analyzer: "lucene.standard".into(),
            size: Some(1),
        };
        let plan = SearchIndex {
            size: Some(2),
            ..state.clone()
        };
        assert_eq!(
            patch(&state, &plan, &PatchOptions::new()),
            Some(SearchIndex {
                size: Some(2),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_required_field_change_is_sent() {
        let state = SearchIndex {
            name: "idx".into(),
            analyzer: "lucene.standard".into(),
            size: None,
        };
        let plan = SearchIndex {
            analyzer: "lucene.english".into(),
            ..state.clone()
        };
        assert_eq!(
            patch(&state, &plan, &PatchOptions::new()),
            Some(SearchIndex {
                analyzer: "lucene.english".into(),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_non_finite_disk_size_is_an_error() {
        let state = disk_cluster(50.0, Some(50.0), None);
        let plan = disk_cluster(f64::NAN, None, None);
        let err = patch_payload(Some(&state), Some(&plan), &PatchOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }), "{:?}", err);
    }

    #[test]
    fn test_is_zero_values() {
        assert!(is_zero_values(&ClusterDescription::default()).unwrap());
        let named = ClusterDescription {
            name: Some("my-cluster".into()),
            ..Default::default()
        };
        assert!(!is_zero_values(&named).unwrap());
    }
}
