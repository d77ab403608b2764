//! Fixed plan catalog and static reference tables.
//!
//! Reference data, not algorithm: each plan is a hard-coded directive chain
//! over the discovered package universe. Two chains deliberately extend the
//! previous plan's chain (`Android` continues `SDK`, `PDK` continues
//! `AppSecurity`) because the original generator reused the plan object
//! between writes.

use crate::planner::plan::Directive;
use lazy_static::lazy_static;
use std::collections::BTreeMap;

/// A named plan and the ordered directives that produce it.
#[derive(Debug, Clone)]
pub struct PlanSpec {
    pub name: &'static str,
    pub directives: Vec<Directive>,
}

type TestTable = BTreeMap<&'static str, Vec<&'static str>>;

lazy_static! {
    /// Tests known to be flaky in the lab or not passing on userdebug builds.
    pub static ref FLAKY_TESTS: TestTable = {
        let mut m = TestTable::new();
        m.insert("android.app", vec![
            "cts.ActivityManagerTest#testIsRunningInTestHarness",
        ]);
        m.insert("android.dpi", vec![
            "cts.DefaultManifestAttributesSdkTest#testPackageHasExpectedSdkVersion",
        ]);
        m.insert("android.hardware", vec![
            "cts.CameraTest#testVideoSnapshot",
            "cts.CameraGLTest#testCameraToSurfaceTextureMetadata",
            "cts.CameraGLTest#testSetPreviewTextureBothCallbacks",
            "cts.CameraGLTest#testSetPreviewTexturePreviewCallback",
        ]);
        m.insert("android.media", vec![
            "cts.DecoderTest#testCodecResetsH264WithSurface",
            "cts.StreamingMediaPlayerTest#testHLS",
        ]);
        m.insert("android.net", vec![
            "cts.ConnectivityManagerTest#testStartUsingNetworkFeature_enableHipri",
            "cts.DnsTest#testDnsWorks",
            "cts.SSLCertificateSocketFactoryTest#testCreateSocket",
            "cts.SSLCertificateSocketFactoryTest#test_createSocket_bind",
            "cts.SSLCertificateSocketFactoryTest#test_createSocket_simple",
            "cts.SSLCertificateSocketFactoryTest#test_createSocket_wrapping",
            "cts.TrafficStatsTest#testTrafficStatsForLocalhost",
            "wifi.cts.NsdManagerTest#testAndroidTestCaseSetupProperly",
        ]);
        m.insert("android.os", vec![
            "cts.BuildVersionTest#testReleaseVersion",
            "cts.BuildTest#testIsSecureUserBuild",
        ]);
        m.insert("android.security", vec![
            "cts.BannedFilesTest#testNoSu",
            "cts.BannedFilesTest#testNoSuInPath",
            "cts.ListeningPortsTest#testNoRemotelyAccessibleListeningUdp6Ports",
            "cts.ListeningPortsTest#testNoRemotelyAccessibleListeningUdpPorts",
            "cts.PackageSignatureTest#testPackageSignatures",
            "cts.SELinuxDomainTest#testSuDomain",
            "cts.SELinuxHostTest#testAllEnforcing",
        ]);
        m.insert("android.webkit", vec![
            "cts.WebViewClientTest#testOnUnhandledKeyEvent",
        ]);
        m.insert("com.android.cts.filesystemperf", vec![
            "RandomRWTest#testRandomRead",
            "RandomRWTest#testRandomUpdate",
        ]);
        m
    };

    /// Small-size test packages already published to AOSP.
    pub static ref SMALL_TESTS: TestTable = table_of(&[
        "android.aadb",
        "android.acceleration",
        "android.accessibility",
        "android.accessibilityservice",
        "android.accounts",
        "android.admin",
        "android.animation",
        "android.bionic",
        "android.bluetooth",
        "android.calendarcommon",
        "android.content",
        "android.core.tests.libcore.package.com",
        "android.core.tests.libcore.package.conscrypt",
        "android.core.tests.libcore.package.dalvik",
        "android.core.tests.libcore.package.sun",
        "android.core.tests.libcore.package.tests",
        "android.database",
        "android.dreams",
        "android.drm",
        "android.effect",
        "android.gesture",
        "android.graphics",
        "android.graphics2",
        "android.jni",
        "android.keystore",
        "android.location",
        "android.nativemedia.sl",
        "android.nativemedia.xa",
        "android.nativeopengl",
        "android.ndef",
        "android.opengl",
        "android.openglperf",
        "android.permission",
        "android.preference",
        "android.preference2",
        "android.provider",
        "android.renderscript",
        "android.rscpp",
        "android.rsg",
        "android.sax",
        "android.signature",
        "android.speech",
        "android.tests.appsecurity",
        "android.text",
        "android.textureview",
        "android.theme",
        "android.usb",
        "android.util",
        "com.android.cts.dram",
        "com.android.cts.filesystemperf",
        "com.android.cts.jank",
        "com.android.cts.opengl",
        "com.android.cts.simplecpu",
        "com.android.cts.ui",
        "com.android.cts.uihost",
        "com.android.cts.videoperf",
        "zzz.android.monkey",
    ]);

    /// Medium-size test packages already published to AOSP.
    pub static ref MEDIUM_TESTS: TestTable = table_of(&[
        "android.app",
        "android.core.tests.libcore.package.libcore",
        "android.core.tests.libcore.package.org",
        "android.core.vm-tests-tf",
        "android.dpi",
        "android.host.security",
        "android.net",
        "android.os",
        "android.permission2",
        "android.security",
        "android.telephony",
        "android.webkit",
        "android.widget",
        "com.android.cts.browserbench",
    ]);

    /// New test packages vetted for the L launch.
    pub static ref VETTED_NEW_PACKAGES: TestTable = table_of(&[
        "android.JobScheduler",
        "android.core.tests.libcore.package.harmony_annotation",
        "android.core.tests.libcore.package.harmony_beans",
        "android.core.tests.libcore.package.harmony_java_io",
        "android.core.tests.libcore.package.harmony_java_lang",
        "android.core.tests.libcore.package.harmony_java_math",
        "android.core.tests.libcore.package.harmony_java_net",
        "android.core.tests.libcore.package.harmony_java_nio",
        "android.core.tests.libcore.package.harmony_java_util",
        "android.core.tests.libcore.package.harmony_java_text",
        "android.core.tests.libcore.package.harmony_javax_security",
        "android.core.tests.libcore.package.harmony_logging",
        "android.core.tests.libcore.package.harmony_prefs",
        "android.core.tests.libcore.package.harmony_sql",
        "android.core.tests.libcore.package.jsr166",
        "android.core.tests.libcore.package.okhttp",
        "android.display",
        "android.host.theme",
        "android.jdwp",
        "android.location2",
        "android.print",
        "android.renderscriptlegacy",
        "android.signature",
        "android.tv",
        "android.uiautomation",
        "android.uirendering",
        "android.webgl",
        "com.drawelements.deqp.gles3",
        "com.drawelements.deqp.gles31",
    ]);
}

fn table_of(packages: &[&'static str]) -> TestTable {
    packages.iter().map(|p| (*p, Vec::new())).collect()
}

fn include(pattern: &str) -> Directive {
    Directive::Include(pattern.to_string())
}

fn exclude(pattern: &str) -> Directive {
    Directive::Exclude(pattern.to_string())
}

fn include_whole(package: &str) -> Directive {
    // Full-package match: anchor the literal name.
    Directive::Include(format!("{package}$"))
}

fn exclude_whole(package: &str) -> Directive {
    Directive::Exclude(format!("{package}$"))
}

fn exclude_flaky_tests(directives: &mut Vec<Directive>) {
    for (package, tests) in FLAKY_TESTS.iter() {
        directives.push(Directive::ExcludeTests(
            package.to_string(),
            tests.iter().map(|t| t.to_string()).collect(),
        ));
    }
}

/// The fixed plan catalog, in generation order.
pub fn plan_catalog() -> Vec<PlanSpec> {
    let mut catalog = Vec::new();

    catalog.push(PlanSpec {
        name: "CTS",
        directives: vec![exclude(r"android\.performance.*")],
    });

    catalog.push(PlanSpec {
        name: "CTS-TF",
        directives: vec![exclude(r"android\.performance.*")],
    });

    // Plan without media streaming tests.
    catalog.push(PlanSpec {
        name: "CTS-No-Media-Stream",
        directives: vec![
            exclude(r"android\.performance.*"),
            exclude(r"android\.media\.cts\.StreamingMediaPlayerTest.*"),
        ],
    });

    catalog.push(PlanSpec {
        name: "SDK",
        directives: vec![exclude(r"android\.performance.*")],
    });

    // Continues the SDK chain.
    catalog.push(PlanSpec {
        name: "Android",
        directives: vec![
            exclude(r"android\.performance.*"),
            exclude(r"android\.signature"),
            exclude(r"android\.core.*"),
        ],
    });

    // Allow-list plans drop everything first, then pull packages back in.
    catalog.push(PlanSpec {
        name: "Java",
        directives: vec![
            exclude(".*"),
            include(r"android\.core\.tests.*"),
            exclude(r"android\.core\.tests\.libcore\.package\.harmony.*"),
        ],
    });

    catalog.push(PlanSpec {
        name: "Harmony",
        directives: vec![
            exclude(".*"),
            include(r"android\.core\.tests\.libcore\.package\.harmony.*"),
        ],
    });

    catalog.push(PlanSpec {
        name: "VM-TF",
        directives: vec![exclude(".*"), include(r"android\.core\.vm-tests-tf")],
    });

    catalog.push(PlanSpec {
        name: "AppSecurity",
        directives: vec![exclude(".*"), include(r"android\.tests\.appsecurity")],
    });

    // Hard-coded allow list; continues the AppSecurity chain.
    catalog.push(PlanSpec {
        name: "PDK",
        directives: vec![
            exclude(".*"),
            include(r"android\.tests\.appsecurity"),
            exclude(".*"),
            include(r"android\.aadb"),
            include(r"android\.bluetooth"),
            include(r"android\.graphics.*"),
            include(r"android\.hardware"),
            include(r"android\.media"),
            exclude(r"android\.mediastress"),
            include(r"android\.net"),
            include(r"android\.opengl.*"),
            include(r"android\.renderscript"),
            include(r"android\.telephony"),
            include(r"android\.nativemedia.*"),
            include(r"com\.android\.cts\..*"),
        ],
    });

    // Stable plan: everything except packages/tests known to flake.
    let mut directives = vec![exclude(r"com\.android\.cts\.browserbench")];
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-stable",
        directives,
    });

    // Flaky plan: exactly the tests the stable plan leaves out.
    let mut directives = vec![exclude(".*"), include(r"com\.android\.cts\.browserbench")];
    for (package, tests) in FLAKY_TESTS.iter() {
        directives.push(include_whole(package));
        directives.push(Directive::IncludeTests(
            package.to_string(),
            tests.iter().map(|t| t.to_string()).collect(),
        ));
    }
    catalog.push(PlanSpec {
        name: "CTS-flaky",
        directives,
    });

    // Public small-size sub plan.
    let mut directives = vec![exclude(".*")];
    for package in SMALL_TESTS.keys() {
        directives.push(include_whole(package));
    }
    directives.push(exclude(r"com\.android\.cts\.browserbench"));
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-kitkat-small",
        directives,
    });

    // Public medium-size sub plan.
    let mut directives = vec![exclude(".*")];
    for package in MEDIUM_TESTS.keys() {
        directives.push(include_whole(package));
    }
    directives.push(exclude(r"com\.android\.cts\.browserbench"));
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-kitkat-medium",
        directives,
    });

    // Public large hardware sub plan.
    let mut directives = vec![
        exclude(".*"),
        include(r"android\.hardware$"),
        exclude(r"com\.android\.cts\.browserbench"),
    ];
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-hardware",
        directives,
    });

    // Public large media sub plan.
    let mut directives = vec![
        exclude(".*"),
        include(r"android\.media$"),
        include(r"android\.view$"),
        exclude(r"com\.android\.cts\.browserbench"),
    ];
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-media",
        directives,
    });

    // Public large mediastress sub plan.
    let mut directives = vec![
        exclude(".*"),
        include(r"android\.mediastress$"),
        exclude(r"com\.android\.cts\.browserbench"),
    ];
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-mediastress",
        directives,
    });

    // New tests vetted for the L launch.
    let mut directives = vec![exclude(".*")];
    for package in VETTED_NEW_PACKAGES.keys() {
        directives.push(include_whole(package));
    }
    directives.push(exclude(r"com\.android\.cts\.browserbench"));
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-l-tests",
        directives,
    });

    // Staging: whatever the published and vetted plans do not already cover.
    let mut directives = Vec::new();
    for package in SMALL_TESTS.keys() {
        directives.push(exclude_whole(package));
    }
    for package in MEDIUM_TESTS.keys() {
        directives.push(exclude_whole(package));
    }
    for package in VETTED_NEW_PACKAGES.keys() {
        directives.push(exclude_whole(package));
    }
    directives.push(exclude(r"android\.hardware$"));
    directives.push(exclude(r"android\.media$"));
    directives.push(exclude(r"android\.view$"));
    directives.push(exclude(r"android\.mediastress$"));
    directives.push(exclude(r"com\.android\.cts\.browserbench"));
    exclude_flaky_tests(&mut directives);
    catalog.push(PlanSpec {
        name: "CTS-staging",
        directives,
    });

    catalog.push(PlanSpec {
        name: "CTS-DEQP",
        directives: vec![exclude(".*"), include(r"com\.drawelements\.")],
    });

    catalog.push(PlanSpec {
        name: "CTS-webview",
        directives: vec![exclude(".*"), include(r"android\.webgl")],
    });

    catalog
}
