// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plug-in surface built from query results and a stored layout

use bim_query_engine::{instances, MemoryStore};
use bim_query_model::{Category, Entity, InstanceQuery};
use bim_query_ui::{
    build_tab, Checklist, ChecklistItem, PullDownSpec, PushSpec, Result, RibbonHost, TabSpec,
};
use std::sync::Arc;

const MODEL: &str = include_str!("../../bim-query-engine/tests/fixtures/model.json");
const TAB: &str = include_str!("fixtures/tab.json");

fn door_checklist(store: &MemoryStore) -> Checklist<Arc<Entity>> {
    let doors = instances(store, &InstanceQuery::new(Category::Doors).any_variant()).unwrap();
    Checklist::from_items(doors.into_iter().enumerate().map(|(i, door)| {
        let level = door
            .level
            .and_then(|l| store.levels().iter().find(|lv| lv.id == l))
            .map(|lv| lv.name.clone())
            .unwrap_or_default();
        let family = door.grouping_name.clone().unwrap_or_default();
        let name = door.discriminator_name.clone();
        ChecklistItem::new(door, name)
            .with_number(i as u32 + 1)
            .in_section(level)
            .in_subsection(family)
    }))
}

#[test]
fn test_checklist_from_query_results() {
    let store = MemoryStore::from_json(MODEL).unwrap();
    let mut list = door_checklist(&store);

    let level_names: Vec<&str> = list
        .roots()
        .iter()
        .map(|&id| list.name(id).unwrap())
        .collect();
    assert_eq!(level_names, vec!["Level 1", "Level 2"]);

    let level_2 = list.find_section("Level 2").unwrap();
    let families: Vec<&str> = list
        .children(level_2)
        .unwrap()
        .iter()
        .map(|&id| list.name(id).unwrap())
        .collect();
    assert_eq!(families, vec!["M_Double-Flush", "M_Single-Flush"]);

    list.set_checked(level_2, true).unwrap();
    let checked: Vec<u32> = list.checked_items().iter().map(|e| e.id.0).collect();
    assert_eq!(checked, vec![122, 123]);

    let level_1 = list.find_section("Level 1").unwrap();
    let single = list.find_group(level_1, "M_Single-Flush").unwrap().unwrap();
    list.toggle(&[single, level_2]).unwrap();
    let checked: Vec<u32> = list.checked_items().iter().map(|e| e.id.0).collect();
    assert_eq!(checked, vec![120, 121]);
}

/// Host that keeps an outline of the built ribbon
#[derive(Default)]
struct OutlineHost {
    outline: Vec<String>,
}

impl RibbonHost for OutlineHost {
    type Panel = ();
    type PullDown = ();

    fn create_tab(&mut self, name: &str) -> Result<()> {
        self.outline.push(name.to_string());
        Ok(())
    }

    fn create_panel(&mut self, _tab: &str, name: &str) -> Result<()> {
        self.outline.push(format!("  {name}"));
        Ok(())
    }

    fn add_push(&mut self, _panel: &mut (), button: &PushSpec) -> Result<()> {
        self.outline.push(format!("    {}", button.command));
        Ok(())
    }

    fn add_pull_down(&mut self, _panel: &mut (), button: &PullDownSpec) -> Result<()> {
        self.outline
            .push(format!("    [{}]", button.common.internal_name));
        Ok(())
    }

    fn add_child_push(&mut self, _parent: &mut (), button: &PushSpec) -> Result<()> {
        self.outline.push(format!("      {}", button.command));
        Ok(())
    }
}

#[test]
fn test_build_stored_layout() {
    let tab = TabSpec::from_json(TAB).unwrap();
    let mut host = OutlineHost::default();

    assert_eq!(build_tab(&mut host, &tab).unwrap(), 4);
    assert_eq!(
        host.outline,
        vec![
            "Query Tests",
            "  Major tests",
            "    GeneralTest",
            "  Minor tests",
            "    CollectorsTest",
            "    [utilities]",
            "      ChecklistTest",
        ]
    );
}
